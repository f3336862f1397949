//! Unified error system
//!
//! - [`ErrorCode`]: Standardized error codes, each mapped to an HTTP status
//! - [`ErrorCategory`]: Classification of errors by family
//! - [`AppError`]: Code + caller-facing message, renders as `{ "error": "..." }`
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::OrderNotFound);
//! assert_eq!(err.message, "Order not found");
//!
//! let err = AppError::missing_fields(&["email", "status"]);
//! assert_eq!(err.message, "Missing required fields: email, status");
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, ErrorBody};
