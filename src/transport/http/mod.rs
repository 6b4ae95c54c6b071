pub mod error;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod health;
    pub mod products;
}

pub use error::ApiError;
pub use router::{create_router, ApiDoc};
pub use types::AppState;
