//! Public order lookup
//!
//! The query is classified before any storage access, and the response is
//! the reduced projection only. Email and admin notes never leave here.

use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{OrderProjection, TrackingEntry};
use shared::order::{QueryError, SearchQuery};

use crate::error::ServiceError;
use crate::state::AppState;

const LOOKUP_FAILED: &str = "Failed to search for order";

/// Lookup result; `order: None` is the uniform not-found shape
#[derive(Debug, Clone, Serialize)]
pub struct OrderLookup {
    pub order: Option<OrderProjection>,
    pub tracking: Vec<TrackingEntry>,
}

impl OrderLookup {
    pub fn not_found() -> Self {
        Self {
            order: None,
            tracking: Vec::new(),
        }
    }
}

/// Classify a raw lookup query, failing closed
pub fn parse_query(raw: &str) -> Result<SearchQuery, AppError> {
    SearchQuery::classify(raw).map_err(|e| match e {
        QueryError::Empty => {
            AppError::with_message(ErrorCode::RequiredField, "Search query is required")
        }
        QueryError::Unrecognized => AppError::new(ErrorCode::InvalidSearchQuery),
    })
}

/// Resolve a classified query to at most one inquiry and its history
pub async fn find_order(state: &AppState, query: &SearchQuery) -> Result<OrderLookup, AppError> {
    let found = match query {
        SearchQuery::OrderNumber(number) => state.inquiries.find_by_order_number(number).await,
        SearchQuery::Email(email) => state.inquiries.find_latest_by_email(email).await,
    }
    .map_err(|e| ServiceError::from(e).into_app_error_with(LOOKUP_FAILED))?;

    let Some(inquiry) = found else {
        tracing::debug!(kind = query.kind(), "Order lookup: no match");
        return Ok(OrderLookup::not_found());
    };

    let events = state
        .tracking
        .list_events(inquiry.id)
        .await
        .map_err(|e| ServiceError::from(e).into_app_error_with(LOOKUP_FAILED))?;

    tracing::info!(
        kind = query.kind(),
        order_number = %inquiry.order_number,
        events = events.len(),
        "Order lookup matched"
    );

    Ok(OrderLookup {
        order: Some(OrderProjection::from(&inquiry)),
        tracking: events.iter().map(TrackingEntry::from).collect(),
    })
}

/// Classify then resolve
pub async fn lookup_order(state: &AppState, raw_query: &str) -> Result<OrderLookup, AppError> {
    let query = parse_query(raw_query)?;
    find_order(state, &query).await
}
