pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use domain::{FieldError, ObjectId, Product};
pub use storage::{PostgresProductStore, ProductRepository, StoreError};
