use crate::domain::FieldError;
use crate::storage::StoreError;
use crate::transport::http::types::{MessageResponse, ValidationErrorResponse};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

pub const INVALID_ID_MESSAGE: &str = "Invalid product ID format";
pub const VALIDATION_MESSAGE: &str = "One or more validation errors occurred.";

/// Every way a product request can fail, mapped onto a status code and JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("Product with ID {0} not found")]
    NotFound(String),
    /// Storage failures surface their text to the client unredacted.
    #[error("{context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn invalid_id() -> Self {
        Self::BadRequest(INVALID_ID_MESSAGE.to_string())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn storage(context: impl Into<String>, source: StoreError) -> Self {
        Self::Storage {
            context: context.into(),
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::InvalidJson(_) | Self::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn message(status: StatusCode, message: String, details: Option<String>) -> Response {
    (status, Json(MessageResponse { message, details })).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::BadRequest(msg) => message(status, msg, None),
            Self::InvalidJson(details) => {
                message(status, "Invalid JSON body".to_string(), Some(details))
            }
            Self::Validation(errors) => (
                status,
                Json(ValidationErrorResponse {
                    message: VALIDATION_MESSAGE.to_string(),
                    errors,
                }),
            )
                .into_response(),
            Self::NotFound(id) => message(status, format!("Product with ID {} not found", id), None),
            Self::Storage { context, source } => {
                tracing::error!(error = %source, "{}", context);
                message(status, context, Some(source.to_string()))
            }
        }
    }
}
