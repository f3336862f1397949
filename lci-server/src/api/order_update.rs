//! POST /api/admin/order-update: status change plus customer notification

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::order::OrderStatus;
use shared::validation::{is_valid_email, non_blank};
use uuid::Uuid;

use crate::auth::AdminIdentity;
use crate::services::order_update::{self, OrderUpdate};
use crate::state::AppState;

use super::{ApiResult, json_body};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdateRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub order_number: Option<String>,
    pub status: Option<String>,
    pub tracking_number: Option<String>,
    pub estimated_delivery: Option<String>,
    pub message: Option<String>,
    pub admin_notes: Option<String>,
    pub inquiry_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub success: bool,
}

/// `YYYY-MM-DD`, or an RFC 3339 timestamp reduced to its date
pub fn parse_delivery_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| AppError::new(ErrorCode::InvalidDeliveryDate))
}

impl OrderUpdateRequest {
    /// Validate into a service command. Nothing here touches storage.
    pub fn validate(self) -> Result<OrderUpdate, AppError> {
        let (Some(email), Some(name), Some(order_number), Some(status)) = (
            non_blank(self.email.as_deref()),
            non_blank(self.name.as_deref()),
            non_blank(self.order_number.as_deref()),
            non_blank(self.status.as_deref()),
        ) else {
            return Err(AppError::missing_fields(&[
                "email",
                "name",
                "orderNumber",
                "status",
            ]));
        };

        if !is_valid_email(&email) {
            return Err(AppError::new(ErrorCode::InvalidEmail));
        }
        let status: OrderStatus = status
            .parse()
            .map_err(|_| AppError::new(ErrorCode::InvalidOrderStatus))?;
        let estimated_delivery = non_blank(self.estimated_delivery.as_deref())
            .map(|d| parse_delivery_date(&d))
            .transpose()?;

        Ok(OrderUpdate {
            inquiry_id: self.inquiry_id,
            order_number,
            email,
            name,
            status,
            tracking_number: non_blank(self.tracking_number.as_deref()),
            estimated_delivery,
            admin_notes: non_blank(self.admin_notes.as_deref()),
            message: non_blank(self.message.as_deref()),
        })
    }
}

pub async fn update_order(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    payload: Result<Json<OrderUpdateRequest>, JsonRejection>,
) -> ApiResult<UpdateResponse> {
    let update = json_body(payload)?.validate()?;

    tracing::info!(
        admin = %identity.email,
        order_number = %update.order_number,
        status = %update.status,
        "Order update requested"
    );

    order_update::apply(&state, update, identity.user_id).await?;
    Ok(Json(UpdateResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> OrderUpdateRequest {
        OrderUpdateRequest {
            email: Some("buyer@example.com".into()),
            name: Some("Meera".into()),
            order_number: Some("LCI-20250101-1234".into()),
            status: Some("shipped".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_fields_listed() {
        let mut req = request();
        req.name = Some("   ".into());
        let err = req.validate().unwrap_err();
        assert_eq!(
            err.message,
            "Missing required fields: email, name, orderNumber, status"
        );
    }

    #[test]
    fn test_rejects_bad_email_and_status() {
        let mut req = request();
        req.email = Some("not-an-email".into());
        assert_eq!(req.validate().unwrap_err().message, "Invalid email format");

        let mut req = request();
        req.status = Some("lost".into());
        assert_eq!(req.validate().unwrap_err().code, ErrorCode::InvalidOrderStatus);

        // Case matters: the closed set is lowercase
        let mut req = request();
        req.status = Some("Shipped".into());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_delivery_date_formats() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(parse_delivery_date("2025-03-14").unwrap(), date);
        assert_eq!(parse_delivery_date("2025-03-14T10:00:00Z").unwrap(), date);
        assert_eq!(
            parse_delivery_date("14/03/2025").unwrap_err().message,
            "Invalid estimated delivery date"
        );
    }

    #[test]
    fn test_blank_optionals_become_absent() {
        let mut req = request();
        req.tracking_number = Some("".into());
        req.message = Some("  ".into());
        req.estimated_delivery = Some("".into());
        let update = req.validate().unwrap();
        assert_eq!(update.tracking_number, None);
        assert_eq!(update.message, None);
        assert_eq!(update.estimated_delivery, None);
    }
}
