//! Error codes for the order desk
//!
//! Codes are grouped by family:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code enum
///
/// Represented as u16 on the wire so clients can branch on a stable number
/// while the `error` string stays human-readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Too many requests from one client
    TooManyRequests = 9,

    // ==================== 1xxx: Auth ====================
    /// No identity token supplied
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token is invalid, expired, or does not resolve to a user
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Status value outside the closed set
    InvalidOrderStatus = 4002,
    /// Lookup query is neither an email nor an order number
    InvalidSearchQuery = 4004,
    /// Estimated delivery is not a calendar date
    InvalidDeliveryDate = 4005,
    /// Email address has the wrong shape
    InvalidEmail = 4006,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
}

impl ErrorCode {
    /// Numeric value of the code
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "Validation failed",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",
            Self::TooManyRequests => "Too many requests, try again later",

            Self::NotAuthenticated => "Missing authorization header",
            Self::InvalidCredentials => "Invalid credentials",
            Self::TokenInvalid => "Unauthorized",

            Self::AdminRequired => "Forbidden: Admin access required",

            Self::OrderNotFound => "Order not found",
            Self::InvalidOrderStatus => "Invalid status value",
            Self::InvalidSearchQuery => {
                "Invalid format. Please enter a valid email or order number (e.g., LCI-20250101-1234)"
            }
            Self::InvalidDeliveryDate => "Invalid estimated delivery date",
            Self::InvalidEmail => "Invalid email format",

            Self::InternalError => "An unexpected error occurred",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            9 => Ok(ErrorCode::TooManyRequests),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1004 => Ok(ErrorCode::TokenInvalid),

            2003 => Ok(ErrorCode::AdminRequired),

            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::InvalidOrderStatus),
            4004 => Ok(ErrorCode::InvalidSearchQuery),
            4005 => Ok(ErrorCode::InvalidDeliveryDate),
            4006 => Ok(ErrorCode::InvalidEmail),

            9001 => Ok(ErrorCode::InternalError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::AdminRequired.code(), 2003);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_round_trips_every_family() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::TokenInvalid,
            ErrorCode::AdminRequired,
            ErrorCode::InvalidSearchQuery,
            ErrorCode::InternalError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        // Retired numbers stay unassigned
        assert_eq!(ErrorCode::try_from(9002), Err(InvalidErrorCode(9002)));
    }

    #[test]
    fn test_wire_messages() {
        assert_eq!(
            ErrorCode::NotAuthenticated.message(),
            "Missing authorization header"
        );
        assert_eq!(ErrorCode::TokenInvalid.message(), "Unauthorized");
        assert_eq!(
            ErrorCode::AdminRequired.message(),
            "Forbidden: Admin access required"
        );
        assert_eq!(
            ErrorCode::InternalError.message(),
            "An unexpected error occurred"
        );
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");
        let code: ErrorCode = serde_json::from_str("2003").unwrap();
        assert_eq!(code, ErrorCode::AdminRequired);
    }
}
