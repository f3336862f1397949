//! Error type and wire body

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error with structured error code
///
/// The message is what the caller sees. System-family errors carry a generic
/// message only; the underlying cause is logged where it happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Missing-field error listing every required field
    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::with_message(
            ErrorCode::RequiredField,
            format!("Missing required fields: {}", fields.join(", ")),
        )
    }

    /// No identity token was presented
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// The identity token did not resolve to a user
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::TokenInvalid)
    }

    /// Authenticated, but not an administrator
    pub fn admin_required() -> Self {
        Self::new(ErrorCode::AdminRequired)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Create an internal error with the generic message
    pub fn internal() -> Self {
        Self::new(ErrorCode::InternalError)
    }
}

/// Error body returned by every endpoint: `{ "error": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            error: err.message.clone(),
        }
    }
}

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        if !self.code.is_client_error() {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::OrderNotFound);
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(err.message, "Order not found");
    }

    #[test]
    fn test_missing_fields_message() {
        let err = AppError::missing_fields(&["email", "name", "orderNumber", "status"]);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message,
            "Missing required fields: email, name, orderNumber, status"
        );
    }

    #[test]
    fn test_auth_constructors() {
        assert_eq!(
            AppError::not_authenticated().http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::unauthorized().message, "Unauthorized");
        assert_eq!(
            AppError::admin_required().http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_error_body_shape() {
        let err = AppError::internal();
        let json = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "error": "An unexpected error occurred" })
        );
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::OrderNotFound, "Inquiry not found");
        assert_eq!(format!("{}", err), "Inquiry not found");
    }
}
