//! Inquiry model
//!
//! An inquiry is created by the public contact form and becomes the order
//! record that staff move through the lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::order::{OrderNumber, OrderStatus};

/// Stored inquiry (full record, admin-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Inquiry {
    pub id: Uuid,
    pub order_number: String,
    pub name: String,
    pub company: Option<String>,
    pub email: String,
    pub country: String,
    pub product_interest: Option<String>,
    /// Minimum order quantity, positive when present
    pub moq: Option<i32>,
    pub message: String,
    pub order_status: OrderStatus,
    pub tracking_number: Option<String>,
    pub estimated_delivery: Option<NaiveDate>,
    /// Internal notes, never part of any public response
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated contact-form submission
#[derive(Debug, Clone, PartialEq)]
pub struct NewInquiry {
    pub name: String,
    pub company: Option<String>,
    pub email: String,
    pub country: String,
    pub product_interest: Option<String>,
    pub moq: Option<i32>,
    pub message: String,
}

impl NewInquiry {
    /// Materialize the record the store will persist
    pub fn into_inquiry(self, order_number: &OrderNumber, created_at: DateTime<Utc>) -> Inquiry {
        Inquiry {
            id: Uuid::new_v4(),
            order_number: order_number.to_string(),
            name: self.name,
            company: self.company,
            email: self.email,
            country: self.country,
            product_interest: self.product_interest,
            moq: self.moq,
            message: self.message,
            order_status: OrderStatus::Pending,
            tracking_number: None,
            estimated_delivery: None,
            admin_notes: None,
            created_at,
        }
    }
}

/// Operational fields written by the privileged update path
#[derive(Debug, Clone, PartialEq)]
pub struct InquiryUpdate {
    pub order_status: OrderStatus,
    pub tracking_number: Option<String>,
    pub estimated_delivery: Option<NaiveDate>,
    pub admin_notes: Option<String>,
}

impl Inquiry {
    pub fn apply(&mut self, update: &InquiryUpdate) {
        self.order_status = update.order_status;
        self.tracking_number = update.tracking_number.clone();
        self.estimated_delivery = update.estimated_delivery;
        self.admin_notes = update.admin_notes.clone();
    }
}

/// Public view of an inquiry returned by the order lookup.
///
/// Deliberately has no `email` or `admin_notes` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderProjection {
    pub id: Uuid,
    pub order_number: String,
    pub name: String,
    pub product_interest: Option<String>,
    pub order_status: OrderStatus,
    pub tracking_number: Option<String>,
    pub estimated_delivery: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<&Inquiry> for OrderProjection {
    fn from(inquiry: &Inquiry) -> Self {
        Self {
            id: inquiry.id,
            order_number: inquiry.order_number.clone(),
            name: inquiry.name.clone(),
            product_interest: inquiry.product_interest.clone(),
            order_status: inquiry.order_status,
            tracking_number: inquiry.tracking_number.clone(),
            estimated_delivery: inquiry.estimated_delivery,
            created_at: inquiry.created_at,
        }
    }
}
