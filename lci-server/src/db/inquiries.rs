//! `inquiries` table

use shared::models::{Inquiry, InquiryUpdate};
use shared::order::OrderStatus;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

const COLUMNS: &str = "id, order_number, name, company, email, country, product_interest, moq, \
     message, order_status, tracking_number, estimated_delivery, admin_notes, created_at";

pub async fn insert(pool: &PgPool, inquiry: &Inquiry) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO inquiries (id, order_number, name, company, email, country, product_interest,
             moq, message, order_status, tracking_number, estimated_delivery, admin_notes, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
    )
    .bind(inquiry.id)
    .bind(&inquiry.order_number)
    .bind(&inquiry.name)
    .bind(&inquiry.company)
    .bind(&inquiry.email)
    .bind(&inquiry.country)
    .bind(&inquiry.product_interest)
    .bind(inquiry.moq)
    .bind(&inquiry.message)
    .bind(inquiry.order_status)
    .bind(&inquiry.tracking_number)
    .bind(inquiry.estimated_delivery)
    .bind(&inquiry.admin_notes)
    .bind(inquiry.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Inquiry>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {COLUMNS} FROM inquiries WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_order_number(
    pool: &PgPool,
    order_number: &str,
) -> Result<Option<Inquiry>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM inquiries WHERE order_number = $1"
    ))
    .bind(order_number)
    .fetch_optional(pool)
    .await
}

pub async fn find_latest_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<Inquiry>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM inquiries WHERE email = $1 ORDER BY created_at DESC LIMIT 1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn list(
    pool: &PgPool,
    status: Option<OrderStatus>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Inquiry>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM inquiries
         WHERE ($1::order_status IS NULL OR order_status = $1)
         ORDER BY created_at DESC LIMIT $2 OFFSET $3"
    ))
    .bind(status)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Current status with a row lock held until the transaction ends
pub async fn lock_status(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<Option<OrderStatus>, sqlx::Error> {
    sqlx::query_scalar("SELECT order_status FROM inquiries WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn apply_update(
    conn: &mut PgConnection,
    id: Uuid,
    update: &InquiryUpdate,
) -> Result<Inquiry, sqlx::Error> {
    sqlx::query_as(&format!(
        "UPDATE inquiries
         SET order_status = $2, tracking_number = $3, estimated_delivery = $4, admin_notes = $5
         WHERE id = $1
         RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(update.order_status)
    .bind(&update.tracking_number)
    .bind(update.estimated_delivery)
    .bind(&update.admin_notes)
    .fetch_one(conn)
    .await
}
