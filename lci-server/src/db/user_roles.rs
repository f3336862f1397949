//! Role-assignment table

use shared::models::AppRole;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn has_role(pool: &PgPool, user_id: Uuid, role: AppRole) -> Result<bool, sqlx::Error> {
    let found: Option<i32> =
        sqlx::query_scalar("SELECT 1 FROM user_roles WHERE user_id = $1 AND role = $2")
            .bind(user_id)
            .bind(role)
            .fetch_optional(pool)
            .await?;
    Ok(found.is_some())
}
