//! Order lifecycle domain: status policy, order numbers, lookup queries

pub mod number;
pub mod query;
pub mod status;

pub use number::{InvalidOrderNumber, OrderNumber, ORDER_NUMBER_PREFIX};
pub use query::{QueryError, SearchQuery, MAX_QUERY_CHARS};
pub use status::{OrderStatus, StatusTone, UnknownStatus};
