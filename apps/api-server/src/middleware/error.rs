//! Error handling - maps domain failures to status codes and JSON bodies.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use blog_core::error::DomainError;
use blog_shared::ErrorResponse;

/// Generic message for storage failures; raw driver errors never reach the client.
pub const DATABASE_ERROR: &str = "Error en la base de datos";

/// Message for unknown post ids.
pub const POST_NOT_FOUND: &str = "Post no encontrado";

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Replace the client-facing message of an internal error.
    pub fn with_internal_message(self, message: &str) -> Self {
        match self {
            AppError::Internal(_) => AppError::Internal(message.to_string()),
            other => other,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(message) => ErrorResponse::not_found(message),
            AppError::BadRequest(message) => ErrorResponse::bad_request(message),
            AppError::PayloadTooLarge(message) => ErrorResponse::payload_too_large(message),
            AppError::Internal(message) => ErrorResponse::internal_error(message),
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => AppError::NotFound(POST_NOT_FOUND.to_string()),
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Storage(e) => {
                tracing::error!(error = %e, "Database error");
                AppError::Internal(DATABASE_ERROR.to_string())
            }
            DomainError::Image(e) => {
                tracing::error!(error = %e, "Image storage error");
                AppError::Internal("Error al guardar la imagen".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
