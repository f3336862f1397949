//! PostgreSQL-backed store

use async_trait::async_trait;
use shared::models::{AppRole, Inquiry, TrackingEvent, User};
use shared::order::OrderNumber;
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    CommittedChange, InquiryFilter, InquiryStore, RoleStore, StatusChange, StoreError,
    TrackingLog, UserDirectory,
};
use crate::db;

/// Unique constraint on `inquiries.order_number`
const ORDER_NUMBER_CONSTRAINT: &str = "inquiries_order_number_key";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("migration failed: {e}")))?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl InquiryStore for PgStore {
    async fn insert_inquiry(&self, inquiry: &Inquiry) -> Result<(), StoreError> {
        db::inquiries::insert(&self.pool, inquiry)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err)
                    if db_err.constraint() == Some(ORDER_NUMBER_CONSTRAINT) =>
                {
                    StoreError::DuplicateOrderNumber(inquiry.order_number.clone())
                }
                _ => StoreError::Database(e),
            })
    }

    async fn find_inquiry(&self, id: Uuid) -> Result<Option<Inquiry>, StoreError> {
        Ok(db::inquiries::find_by_id(&self.pool, id).await?)
    }

    async fn find_by_order_number(
        &self,
        order_number: &OrderNumber,
    ) -> Result<Option<Inquiry>, StoreError> {
        Ok(db::inquiries::find_by_order_number(&self.pool, order_number.as_str()).await?)
    }

    async fn find_latest_by_email(&self, email: &str) -> Result<Option<Inquiry>, StoreError> {
        Ok(db::inquiries::find_latest_by_email(&self.pool, email).await?)
    }

    async fn list_inquiries(&self, filter: &InquiryFilter) -> Result<Vec<Inquiry>, StoreError> {
        Ok(db::inquiries::list(&self.pool, filter.status, filter.limit, filter.offset).await?)
    }

    async fn commit_status_change(
        &self,
        inquiry_id: Uuid,
        change: &StatusChange,
    ) -> Result<CommittedChange, StoreError> {
        let mut tx = self.pool.begin().await?;

        let previous_status = db::inquiries::lock_status(&mut tx, inquiry_id)
            .await?
            .ok_or(StoreError::InquiryNotFound(inquiry_id))?;

        let inquiry = db::inquiries::apply_update(&mut tx, inquiry_id, &change.update).await?;

        // Stamped by the database while the row lock is held
        let event = match change.event_for(previous_status) {
            Some(new_event) => {
                Some(db::tracking::insert(&mut tx, inquiry_id, &new_event).await?)
            }
            None => None,
        };

        // Dropping `tx` on any early return above rolls both writes back
        tx.commit().await?;

        Ok(CommittedChange {
            inquiry,
            previous_status,
            event,
        })
    }
}

#[async_trait]
impl TrackingLog for PgStore {
    async fn list_events(&self, inquiry_id: Uuid) -> Result<Vec<TrackingEvent>, StoreError> {
        Ok(db::tracking::list_for_inquiry(&self.pool, inquiry_id).await?)
    }
}

#[async_trait]
impl UserDirectory for PgStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(db::users::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(db::users::find_by_email(&self.pool, email).await?)
    }
}

#[async_trait]
impl RoleStore for PgStore {
    async fn has_role(&self, user_id: Uuid, role: AppRole) -> Result<bool, StoreError> {
        Ok(db::user_roles::has_role(&self.pool, user_id, role).await?)
    }
}
