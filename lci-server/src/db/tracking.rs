//! `order_tracking` table (append-only)

use shared::models::{NewTrackingEvent, TrackingEvent};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Append an event. `created_at` comes from the database clock at insert
/// time, held at or after the inquiry's previous event.
pub async fn insert(
    conn: &mut PgConnection,
    inquiry_id: Uuid,
    event: &NewTrackingEvent,
) -> Result<TrackingEvent, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO order_tracking (id, inquiry_id, status, message, created_at, created_by)
         VALUES ($1, $2, $3, $4, GREATEST(
             clock_timestamp(),
             (SELECT max(created_at) FROM order_tracking WHERE inquiry_id = $2)
         ), $5)
         RETURNING id, inquiry_id, status, message, created_at, created_by",
    )
    .bind(Uuid::new_v4())
    .bind(inquiry_id)
    .bind(event.status)
    .bind(&event.message)
    .bind(event.created_by)
    .fetch_one(conn)
    .await
}

/// Commit order, oldest first. `seq` is assigned under the inquiry's row lock.
pub async fn list_for_inquiry(
    pool: &PgPool,
    inquiry_id: Uuid,
) -> Result<Vec<TrackingEvent>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, inquiry_id, status, message, created_at, created_by
         FROM order_tracking
         WHERE inquiry_id = $1
         ORDER BY seq ASC",
    )
    .bind(inquiry_id)
    .fetch_all(pool)
    .await
}
