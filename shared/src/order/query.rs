//! Public lookup query classification
//!
//! A lookup query is exactly one of an email address or an order number.
//! Anything else is rejected before storage is touched.

use super::number::OrderNumber;
use crate::validation::is_valid_email;

/// Longest query considered; longer input is truncated before classification
pub const MAX_QUERY_CHARS: usize = 100;

/// Classified lookup key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Email(String),
    OrderNumber(OrderNumber),
}

/// Query that is neither an email address nor an order number
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("search query is required")]
    Empty,
    #[error("search query is neither an email nor an order number")]
    Unrecognized,
}

impl SearchQuery {
    /// Trim, cap at [`MAX_QUERY_CHARS`], then classify.
    pub fn classify(raw: &str) -> Result<Self, QueryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }
        let capped: String = trimmed.chars().take(MAX_QUERY_CHARS).collect();

        if let Ok(number) = OrderNumber::parse(&capped) {
            return Ok(Self::OrderNumber(number));
        }
        if is_valid_email(&capped) {
            return Ok(Self::Email(capped));
        }
        Err(QueryError::Unrecognized)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::OrderNumber(_) => "order_number",
        }
    }
}
