//! POST /api/track-order: public order lookup

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};

use crate::services::lookup::{self, OrderLookup};
use crate::state::AppState;

use super::{ApiResult, json_body};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackOrderRequest {
    #[serde(default)]
    pub search_query: Option<String>,
}

pub async fn track_order(
    State(state): State<AppState>,
    payload: Result<Json<TrackOrderRequest>, JsonRejection>,
) -> ApiResult<OrderLookup> {
    let req = json_body(payload)?;
    let raw = req.search_query.ok_or_else(|| {
        AppError::with_message(ErrorCode::RequiredField, "Search query is required")
    })?;

    let result = lookup::lookup_order(&state, &raw).await?;
    Ok(Json(result))
}
