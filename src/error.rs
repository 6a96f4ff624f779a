//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{services::chat_service::ProviderError, store::StoreError};

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("{0}")]
    Validation(String),

    /// A user with this email already exists.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("Email {0} is already registered")]
    EmailAlreadyRegistered(String),

    /// No document store was configured at startup.
    ///
    /// Returns HTTP 503 Service Unavailable.
    #[error(
        "Document store not configured. Please set up FIREBASE_SERVICE_ACCOUNT_KEY_BASE64 environment variable."
    )]
    StorageUnavailable,

    /// A document store operation failed.
    ///
    /// Returns HTTP 503 when the backend could not be reached, otherwise
    /// HTTP 500. Details are logged, never sent to the client.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// The password could not be hashed.
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// The chat provider failed to answer.
    #[error("Chat provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Malformed or missing JSON bodies are validation failures, not axum's
/// default 415/422 rejections.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `Validation` → 400 Bad Request
/// - `EmailAlreadyRegistered` → 409 Conflict
/// - `StorageUnavailable` → 503 Service Unavailable
/// - `Storage` with a transport failure → 503 Service Unavailable
/// - `Storage`, `Hashing`, `Provider` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Validation(ref msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            AppError::EmailAlreadyRegistered(_) => (
                StatusCode::CONFLICT,
                "email_already_registered",
                self.to_string(),
            ),
            AppError::StorageUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "storage_unavailable",
                self.to_string(),
            ),
            AppError::Storage(ref e @ StoreError::Transport(_)) => {
                tracing::error!(error = %e, "Document store unreachable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "storage_unavailable",
                    "Document store is unreachable.".to_string(),
                )
            }
            AppError::Storage(ref e) => {
                tracing::error!(error = %e, "Document store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Hashing(ref e) => {
                tracing::error!(error = %e, "Password hashing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Provider(ref e) => {
                tracing::error!(error = %e, "Error calling AI");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "provider_error",
                    "Error processing AI request.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::AppError;
    use crate::{services::chat_service::ProviderError, store::StoreError, test_utils};

    #[test]
    fn status_codes_follow_error_taxonomy() {
        let cases = [
            (AppError::Validation("bad".to_string()), StatusCode::BAD_REQUEST),
            (
                AppError::EmailAlreadyRegistered("a@example.com".to_string()),
                StatusCode::CONFLICT,
            ),
            (AppError::StorageUnavailable, StatusCode::SERVICE_UNAVAILABLE),
            (
                AppError::Storage(StoreError::Decode("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Provider(ProviderError::Unavailable("down".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn unreachable_store_is_503() {
        let error = AppError::Storage(test_utils::transport_error().await);

        assert_eq!(error.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn backend_rejection_stays_500() {
        let error = AppError::Storage(StoreError::Backend {
            status: 503,
            message: "backend unreachable".to_string(),
        });

        assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
