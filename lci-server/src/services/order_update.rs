//! Privileged order update
//!
//! Two phases. Phase one commits the inquiry update and its tracking event as
//! a single unit of work; it is the authoritative outcome. Phase two hands
//! the customer notification to the notifier and returns without waiting, so
//! a failed email can never undo or fail a committed change.

use chrono::NaiveDate;
use shared::error::{AppError, ErrorCode};
use shared::models::{Inquiry, InquiryUpdate};
use shared::order::{OrderNumber, OrderStatus};
use uuid::Uuid;

use crate::email::OrderUpdateNotice;
use crate::error::ServiceError;
use crate::state::AppState;
use crate::store::{CommittedChange, StatusChange, StoreError};

/// Validated update request
#[derive(Debug, Clone)]
pub struct OrderUpdate {
    /// Target by id; takes precedence over `order_number`
    pub inquiry_id: Option<Uuid>,
    pub order_number: String,
    /// Notification recipient, as echoed by the console
    pub email: String,
    pub name: String,
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
    pub estimated_delivery: Option<NaiveDate>,
    pub admin_notes: Option<String>,
    pub message: Option<String>,
}

/// Find the inquiry the update targets
async fn resolve_target(state: &AppState, update: &OrderUpdate) -> Result<Inquiry, AppError> {
    let found = match update.inquiry_id {
        Some(id) => {
            let inquiry = state.inquiries.find_inquiry(id).await.map_err(ServiceError::from)?;
            if let Some(ref inquiry) = inquiry
                && inquiry.order_number != update.order_number
            {
                return Err(AppError::validation(
                    "Order number does not match the inquiry",
                ));
            }
            inquiry
        }
        None => match OrderNumber::parse(&update.order_number) {
            Ok(number) => state
                .inquiries
                .find_by_order_number(&number)
                .await
                .map_err(ServiceError::from)?,
            // Not shaped like an order number, so it cannot exist
            Err(_) => None,
        },
    };
    found.ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
}

/// Phase one: commit the status change
pub async fn commit(
    state: &AppState,
    update: &OrderUpdate,
    actor: Uuid,
) -> Result<CommittedChange, AppError> {
    let inquiry = resolve_target(state, update).await?;

    if !inquiry.order_status.is_expected_transition(update.status) {
        tracing::warn!(
            order_number = %inquiry.order_number,
            from = %inquiry.order_status,
            to = %update.status,
            "Unusual status transition"
        );
    }

    let change = StatusChange {
        update: InquiryUpdate {
            order_status: update.status,
            tracking_number: update.tracking_number.clone(),
            estimated_delivery: update.estimated_delivery,
            admin_notes: update.admin_notes.clone(),
        },
        message: update.message.clone(),
        actor: Some(actor),
    };

    state
        .inquiries
        .commit_status_change(inquiry.id, &change)
        .await
        .map_err(|e| match e {
            StoreError::InquiryNotFound(_) => AppError::new(ErrorCode::OrderNotFound),
            other => ServiceError::from(other).into(),
        })
}

/// Commit, then dispatch the customer notification
pub async fn apply(
    state: &AppState,
    update: OrderUpdate,
    actor: Uuid,
) -> Result<CommittedChange, AppError> {
    let committed = commit(state, &update, actor).await?;

    tracing::info!(
        order_number = %committed.inquiry.order_number,
        from = %committed.previous_status,
        to = %committed.inquiry.order_status,
        event_appended = committed.event.is_some(),
        actor = %actor,
        "Order updated"
    );

    state.notifier.dispatch_order_update(OrderUpdateNotice {
        to: update.email,
        name: update.name,
        order_number: committed.inquiry.order_number.clone(),
        status: committed.inquiry.order_status,
        tracking_number: committed.inquiry.tracking_number.clone(),
        estimated_delivery: committed.inquiry.estimated_delivery,
        message: update.message,
    });

    Ok(committed)
}
