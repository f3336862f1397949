//! Order status policy
//!
//! The one place that knows the closed set of statuses together with their
//! display label, customer-facing explanation, email tone, and which moves
//! the business process expects. Endpoints and the email formatter all read
//! from here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order lifecycle status
///
/// `pending → confirmed → processing → shipped → delivered`, with
/// `cancelled` reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "order_status", rename_all = "lowercase"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Visual framing used when a status is shown to a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// Affirmative (delivered)
    Positive,
    /// Warning (cancelled)
    Warning,
    /// Everything in between
    Neutral,
}

impl StatusTone {
    /// Banner background colour for HTML emails
    pub fn color(&self) -> &'static str {
        match self {
            Self::Positive => "#22c55e",
            Self::Warning => "#ef4444",
            Self::Neutral => "#8B4513",
        }
    }
}

impl OrderStatus {
    /// Every status, in business-process order
    pub const ALL: [OrderStatus; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Parse from database/wire string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "processing" => Some(Self::Processing),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Database/wire string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Capitalized label ("Shipped")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Customer-facing explanation of what this status means
    pub fn customer_message(&self) -> &'static str {
        match self {
            Self::Pending => "Your order is pending review.",
            Self::Confirmed => "Your order has been confirmed! We are preparing your items.",
            Self::Processing => "Your order is being processed and prepared for shipment.",
            Self::Shipped => "Your order has been shipped! It's on its way to you.",
            Self::Delivered => "Your order has been delivered. Thank you for your business!",
            Self::Cancelled => {
                "Your order has been cancelled. Please contact us if you have questions."
            }
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            Self::Delivered => StatusTone::Positive,
            Self::Cancelled => StatusTone::Warning,
            _ => StatusTone::Neutral,
        }
    }

    /// No further transition is expected from a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Position along the happy path; `None` for `cancelled`
    fn rank(&self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::Confirmed => Some(1),
            Self::Processing => Some(2),
            Self::Shipped => Some(3),
            Self::Delivered => Some(4),
            Self::Cancelled => None,
        }
    }

    /// Whether moving to `next` follows the expected business process.
    ///
    /// Forward moves (including skips) and cancellation of a live order are
    /// expected. Staying put is fine. Anything else (moving backwards, leaving
    /// a terminal status) is unusual but not forbidden; callers log it.
    pub fn is_expected_transition(&self, next: OrderStatus) -> bool {
        if *self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        match (self.rank(), next.rank()) {
            (_, None) => true,
            (Some(from), Some(to)) => to > from,
            (None, Some(_)) => false,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db())
    }
}

/// Status string outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_db(s).ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
