//! Human-facing order numbers: `LCI-YYYYMMDD-NNNN`

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

pub const ORDER_NUMBER_PREFIX: &str = "LCI";

static ORDER_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^LCI-[0-9]{8}-[0-9]{4}$").expect("static order number regex"));

/// Validated order number
///
/// Immutable once issued. Construction goes through [`OrderNumber::parse`]
/// or [`OrderNumber::generate`], so holding one proves the shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderNumber(String);

/// String that is not shaped like an order number
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid order number: {0}")]
pub struct InvalidOrderNumber(pub String);

impl OrderNumber {
    /// Exact-shape check: `LCI-` + 8 ASCII digits + `-` + 4 ASCII digits
    pub fn is_valid(s: &str) -> bool {
        ORDER_NUMBER_RE.is_match(s)
    }

    pub fn parse(s: &str) -> Result<Self, InvalidOrderNumber> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidOrderNumber(s.to_string()))
        }
    }

    /// Order number for `date` with an explicit 4-digit suffix
    pub fn from_parts(date: NaiveDate, suffix: u16) -> Self {
        Self(format!(
            "{ORDER_NUMBER_PREFIX}-{}-{:04}",
            date.format("%Y%m%d"),
            suffix % 10_000
        ))
    }

    /// Order number for `date` with a random suffix
    pub fn generate(date: NaiveDate) -> Self {
        use rand::Rng;
        let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
        Self::from_parts(date, suffix)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OrderNumber {
    type Error = InvalidOrderNumber;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidOrderNumber(value))
        }
    }
}

impl From<OrderNumber> for String {
    fn from(value: OrderNumber) -> Self {
        value.0
    }
}

impl AsRef<str> for OrderNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
