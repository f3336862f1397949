//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::OrderNotFound => StatusCode::NOT_FOUND,

            Self::NotAuthenticated | Self::InvalidCredentials | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            Self::AdminRequired => StatusCode::FORBIDDEN,

            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,

            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation and malformed input)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
