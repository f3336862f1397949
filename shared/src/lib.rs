//! Shared types for the Lecrafto order desk
//!
//! Domain types used by the HTTP service and its clients: the order status
//! policy, order numbers, inquiry and tracking models, and the error system.

pub mod error;
pub mod models;
pub mod order;
pub mod validation;

// Re-exports
pub use error::{AppError, ErrorCode};
pub use order::{OrderNumber, OrderStatus, SearchQuery};
