//! Tracking history model
//!
//! Append-only: events are written once by the update path and never edited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::order::OrderStatus;

/// One entry in an inquiry's status history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TrackingEvent {
    pub id: Uuid,
    pub inquiry_id: Uuid,
    pub status: OrderStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Administrator who recorded the change
    pub created_by: Option<Uuid>,
}

/// Event to append as part of an order update
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrackingEvent {
    pub status: OrderStatus,
    pub message: Option<String>,
    pub created_by: Option<Uuid>,
}

impl NewTrackingEvent {
    pub fn into_event(self, inquiry_id: Uuid, created_at: DateTime<Utc>) -> TrackingEvent {
        TrackingEvent {
            id: Uuid::new_v4(),
            inquiry_id,
            status: self.status,
            message: self.message,
            created_at,
            created_by: self.created_by,
        }
    }
}

/// Public view of a tracking event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingEntry {
    pub id: Uuid,
    pub status: OrderStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&TrackingEvent> for TrackingEntry {
    fn from(event: &TrackingEvent) -> Self {
        Self {
            id: event.id,
            status: event.status,
            message: event.message.clone(),
            created_at: event.created_at,
        }
    }
}
