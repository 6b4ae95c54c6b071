use crate::storage::ProductRepository;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

pub use crate::domain::{FieldError, Product};

/// Shared handler state. The repository handle is created once at start-up
/// and cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
}

impl AppState {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }
}

/// Body of every non-validation error response.
#[derive(Serialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
    /// Underlying failure text (500s and malformed bodies only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ValidationErrorResponse {
    pub message: String,
    pub errors: Vec<FieldError>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
