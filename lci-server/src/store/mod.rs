//! Storage seams
//!
//! Endpoints talk to storage through these traits. `PgStore` backs them with
//! PostgreSQL; `MemoryStore` backs them in-process for development and tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use shared::models::{
    AppRole, Inquiry, InquiryUpdate, NewTrackingEvent, TrackingEvent, User,
};
use shared::order::{OrderNumber, OrderStatus};
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage-layer error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("order number already exists: {0}")]
    DuplicateOrderNumber(String),
    #[error("inquiry not found: {0}")]
    InquiryNotFound(Uuid),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Admin list filter
#[derive(Debug, Clone, Default)]
pub struct InquiryFilter {
    pub status: Option<OrderStatus>,
    pub limit: i64,
    pub offset: i64,
}

/// Everything the privileged update path writes in one unit of work
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub update: InquiryUpdate,
    /// Customer-facing message; `None` when the admin left it blank
    pub message: Option<String>,
    /// Administrator performing the change
    pub actor: Option<Uuid>,
}

impl StatusChange {
    /// Tracking event to append given the status stored before this change.
    ///
    /// An event is written when the status moves or when the admin supplied a
    /// message. Otherwise the history is left untouched.
    pub fn event_for(&self, prior: OrderStatus) -> Option<NewTrackingEvent> {
        let new_status = self.update.order_status;
        if new_status == prior && self.message.is_none() {
            return None;
        }
        Some(NewTrackingEvent {
            status: new_status,
            message: Some(
                self.message
                    .clone()
                    .unwrap_or_else(|| format!("Status updated to {new_status}")),
            ),
            created_by: self.actor,
        })
    }
}

/// Result of a committed status change
#[derive(Debug, Clone)]
pub struct CommittedChange {
    pub inquiry: Inquiry,
    pub previous_status: OrderStatus,
    pub event: Option<TrackingEvent>,
}

#[async_trait]
pub trait InquiryStore: Send + Sync {
    /// Persist a new inquiry. Fails with `DuplicateOrderNumber` on collision.
    async fn insert_inquiry(&self, inquiry: &Inquiry) -> Result<(), StoreError>;

    async fn find_inquiry(&self, id: Uuid) -> Result<Option<Inquiry>, StoreError>;

    async fn find_by_order_number(
        &self,
        order_number: &OrderNumber,
    ) -> Result<Option<Inquiry>, StoreError>;

    /// Most recent inquiry (by creation time) with exactly this email
    async fn find_latest_by_email(&self, email: &str) -> Result<Option<Inquiry>, StoreError>;

    /// Newest first
    async fn list_inquiries(&self, filter: &InquiryFilter) -> Result<Vec<Inquiry>, StoreError>;

    /// Update the inquiry's operational fields and append the tracking event
    /// implied by [`StatusChange::event_for`], atomically.
    ///
    /// The event is stamped inside the unit of work, after the inquiry is
    /// locked, and never earlier than the inquiry's previous event. The newest
    /// event in the log therefore always matches the inquiry's status.
    async fn commit_status_change(
        &self,
        inquiry_id: Uuid,
        change: &StatusChange,
    ) -> Result<CommittedChange, StoreError>;
}

#[async_trait]
pub trait TrackingLog: Send + Sync {
    /// Events for one inquiry in commit order (oldest first)
    async fn list_events(&self, inquiry_id: Uuid) -> Result<Vec<TrackingEvent>, StoreError>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn has_role(&self, user_id: Uuid, role: AppRole) -> Result<bool, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(status: OrderStatus, message: Option<&str>) -> StatusChange {
        StatusChange {
            update: InquiryUpdate {
                order_status: status,
                tracking_number: None,
                estimated_delivery: None,
                admin_notes: None,
            },
            message: message.map(str::to_string),
            actor: None,
        }
    }

    #[test]
    fn test_status_move_appends_default_message() {
        let event = change(OrderStatus::Shipped, None)
            .event_for(OrderStatus::Pending)
            .unwrap();
        assert_eq!(event.status, OrderStatus::Shipped);
        assert_eq!(event.message.as_deref(), Some("Status updated to shipped"));
    }

    #[test]
    fn test_same_status_without_message_appends_nothing() {
        assert!(change(OrderStatus::Processing, None)
            .event_for(OrderStatus::Processing)
            .is_none());
    }

    #[test]
    fn test_same_status_with_message_appends_note() {
        let event = change(OrderStatus::Processing, Some("Stitching done"))
            .event_for(OrderStatus::Processing)
            .unwrap();
        assert_eq!(event.status, OrderStatus::Processing);
        assert_eq!(event.message.as_deref(), Some("Stitching done"));
    }
}
