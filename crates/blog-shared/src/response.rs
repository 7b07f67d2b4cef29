//! Standardized API response bodies.

use serde::{Deserialize, Serialize};

/// Confirmation body of mutating endpoints: `{"message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body returned with every non-2xx status.
///
/// `error` and `message` carry the same user-facing text; clients read either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The HTTP status code.
    pub status: u16,

    /// The user-facing explanation of this occurrence.
    pub error: String,

    /// Same text as `error`.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status,
            error: message.clone(),
            message,
        }
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(413, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(500, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_carries_error_and_message() {
        let json = serde_json::to_value(ErrorResponse::not_found("Post no encontrado")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": 404,
                "error": "Post no encontrado",
                "message": "Post no encontrado",
            })
        );
    }

    #[test]
    fn test_message_response_shape() {
        let json = serde_json::to_value(MessageResponse::new("Post borrado")).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Post borrado" }));
    }
}
