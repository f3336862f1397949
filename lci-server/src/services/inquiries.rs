//! Contact-form submissions and admin reads

use chrono::Utc;
use shared::error::{AppError, ErrorCode};
use shared::models::{Inquiry, NewInquiry, TrackingEvent};
use shared::order::OrderNumber;
use uuid::Uuid;

use crate::email::InquiryConfirmation;
use crate::error::ServiceError;
use crate::state::AppState;
use crate::store::{InquiryFilter, StoreError};

/// Attempts at finding a free order number before giving up
pub const ORDER_NUMBER_ATTEMPTS: usize = 5;

/// Persist a new inquiry, drawing order numbers from `next_number` until one
/// is free.
pub async fn create_with(
    state: &AppState,
    new: NewInquiry,
    mut next_number: impl FnMut() -> OrderNumber,
) -> Result<Inquiry, AppError> {
    let created_at = Utc::now();
    for attempt in 1..=ORDER_NUMBER_ATTEMPTS {
        let number = next_number();
        let inquiry = new.clone().into_inquiry(&number, created_at);
        match state.inquiries.insert_inquiry(&inquiry).await {
            Ok(()) => return Ok(inquiry),
            Err(StoreError::DuplicateOrderNumber(n)) => {
                tracing::debug!(attempt, order_number = %n, "Order number taken, retrying");
            }
            Err(e) => return Err(ServiceError::from(e).into()),
        }
    }
    tracing::error!("No free order number after {ORDER_NUMBER_ATTEMPTS} attempts");
    Err(AppError::internal())
}

/// Create an inquiry and send the confirmation email
pub async fn submit(state: &AppState, new: NewInquiry) -> Result<Inquiry, AppError> {
    let inquiry = create_with(state, new, || {
        OrderNumber::generate(Utc::now().date_naive())
    })
    .await?;

    tracing::info!(order_number = %inquiry.order_number, "Inquiry received");

    state
        .notifier
        .dispatch_inquiry_confirmation(InquiryConfirmation {
            to: inquiry.email.clone(),
            name: inquiry.name.clone(),
            order_number: inquiry.order_number.clone(),
            product_interest: inquiry.product_interest.clone(),
            message: inquiry.message.clone(),
        });

    Ok(inquiry)
}

/// Admin list, newest first
pub async fn list(state: &AppState, filter: &InquiryFilter) -> Result<Vec<Inquiry>, AppError> {
    Ok(state
        .inquiries
        .list_inquiries(filter)
        .await
        .map_err(ServiceError::from)?)
}

/// Admin timeline for one inquiry, newest first
pub async fn timeline(state: &AppState, inquiry_id: Uuid) -> Result<Vec<TrackingEvent>, AppError> {
    let exists = state
        .inquiries
        .find_inquiry(inquiry_id)
        .await
        .map_err(ServiceError::from)?
        .is_some();
    if !exists {
        return Err(AppError::new(ErrorCode::OrderNotFound));
    }

    let mut events = state
        .tracking
        .list_events(inquiry_id)
        .await
        .map_err(ServiceError::from)?;
    events.reverse();
    Ok(events)
}
