//! POST /api/inquiries: public contact form

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::NewInquiry;
use shared::validation::{is_valid_email, non_blank};

use crate::services::inquiries;
use crate::state::AppState;

use super::json_body;

const MAX_SHORT_FIELD: usize = 200;
const MAX_EMAIL: usize = 254;
const MAX_MESSAGE: usize = 5000;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRequest {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub product_interest: Option<String>,
    pub moq: Option<i64>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryCreated {
    pub order_number: String,
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

impl InquiryRequest {
    pub fn validate(self) -> Result<NewInquiry, AppError> {
        let (Some(name), Some(email), Some(country), Some(message)) = (
            non_blank(self.name.as_deref()),
            non_blank(self.email.as_deref()),
            non_blank(self.country.as_deref()),
            non_blank(self.message.as_deref()),
        ) else {
            return Err(AppError::missing_fields(&[
                "name", "email", "country", "message",
            ]));
        };
        let company = non_blank(self.company.as_deref());
        let product_interest = non_blank(self.product_interest.as_deref());

        check_len("name", &name, MAX_SHORT_FIELD)?;
        check_len("email", &email, MAX_EMAIL)?;
        check_len("country", &country, MAX_SHORT_FIELD)?;
        check_len("message", &message, MAX_MESSAGE)?;
        if let Some(ref company) = company {
            check_len("company", company, MAX_SHORT_FIELD)?;
        }
        if let Some(ref product) = product_interest {
            check_len("productInterest", product, MAX_SHORT_FIELD)?;
        }

        if !is_valid_email(&email) {
            return Err(AppError::new(ErrorCode::InvalidEmail));
        }

        let moq = self
            .moq
            .map(|m| {
                i32::try_from(m)
                    .ok()
                    .filter(|m| *m > 0)
                    .ok_or_else(|| AppError::validation("MOQ must be a positive integer"))
            })
            .transpose()?;

        Ok(NewInquiry {
            name,
            company,
            email,
            country,
            product_interest,
            moq,
            message,
        })
    }
}

pub async fn submit_inquiry(
    State(state): State<AppState>,
    payload: Result<Json<InquiryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<InquiryCreated>), AppError> {
    let new = json_body(payload)?.validate()?;
    let inquiry = inquiries::submit(&state, new).await?;
    Ok((
        StatusCode::CREATED,
        Json(InquiryCreated {
            order_number: inquiry.order_number,
        }),
    ))
}
