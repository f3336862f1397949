//! Admin console endpoints: login, inquiry list, tracking timeline

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{Inquiry, TrackingEvent};
use shared::order::OrderStatus;
use uuid::Uuid;

use crate::auth::password::verify_password;
use crate::error::ServiceError;
use crate::services::inquiries;
use crate::state::AppState;
use crate::store::InquiryFilter;

use super::{ApiResult, json_body};

/// POST /api/admin/login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let req = json_body(payload)?;
    let email = req.email.trim();

    let user = state
        .users
        .find_user_by_email(email)
        .await
        .map_err(ServiceError::from)?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &user.hashed_password) {
        tracing::warn!(user_id = %user.id, "Admin login failed");
        return Err(AppError::invalid_credentials());
    }

    let token = state.jwt.create_token(user.id, &user.email).map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::internal()
    })?;

    tracing::info!(user_id = %user.id, "Admin login");
    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
    }))
}

/// GET /api/admin/inquiries
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiriesQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
}

impl InquiriesQuery {
    fn into_filter(self) -> Result<InquiryFilter, AppError> {
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let page = self.page.unwrap_or(1).max(1);
        let status = match self.status.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => Some(
                s.parse::<OrderStatus>()
                    .map_err(|_| AppError::new(ErrorCode::InvalidOrderStatus))?,
            ),
            None => None,
        };
        Ok(InquiryFilter {
            status,
            limit: per_page,
            offset: (page - 1).saturating_mul(per_page),
        })
    }
}

pub async fn list_inquiries(
    State(state): State<AppState>,
    Query(query): Query<InquiriesQuery>,
) -> ApiResult<Vec<Inquiry>> {
    let filter = query.into_filter()?;
    Ok(Json(inquiries::list(&state, &filter).await?))
}

/// GET /api/admin/inquiries/{id}/tracking
pub async fn inquiry_tracking(
    State(state): State<AppState>,
    Path(inquiry_id): Path<Uuid>,
) -> ApiResult<Vec<TrackingEvent>> {
    Ok(Json(inquiries::timeline(&state, inquiry_id).await?))
}
