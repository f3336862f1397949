//! In-process store for development and tests
//!
//! One mutex guards all tables, so a status change (inquiry update plus
//! tracking append) is atomic just like the PostgreSQL transaction.

use async_trait::async_trait;
use chrono::Utc;
use shared::models::{AppRole, Inquiry, TrackingEvent, User};
use shared::order::OrderNumber;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uuid::Uuid;

use super::{
    CommittedChange, InquiryFilter, InquiryStore, RoleStore, StatusChange, StoreError,
    TrackingLog, UserDirectory,
};

#[derive(Default)]
struct Tables {
    inquiries: Vec<Inquiry>,
    tracking: Vec<TrackingEvent>,
    users: Vec<User>,
    roles: Vec<(Uuid, AppRole)>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    /// Storage calls made through the traits
    calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trait calls served so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent trait call fail with `StoreError::Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Add a staff user (test fixtures, development seeding)
    pub fn add_user(&self, email: &str, hashed_password: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            created_at: Utc::now(),
        };
        self.lock().users.push(user.clone());
        user
    }

    pub fn grant_role(&self, user_id: Uuid, role: AppRole) {
        let mut tables = self.lock();
        if !tables.roles.contains(&(user_id, role)) {
            tables.roles.push((user_id, role));
        }
    }

    /// Raw tracking rows for an inquiry, bypassing the call counter
    pub fn tracking_rows(&self, inquiry_id: Uuid) -> Vec<TrackingEvent> {
        self.lock()
            .tracking
            .iter()
            .filter(|e| e.inquiry_id == inquiry_id)
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        // A panic while holding the lock leaves plain data behind; keep serving it.
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn enter(&self) -> Result<std::sync::MutexGuard<'_, Tables>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store offline".into()));
        }
        Ok(self.lock())
    }
}

#[async_trait]
impl InquiryStore for MemoryStore {
    async fn insert_inquiry(&self, inquiry: &Inquiry) -> Result<(), StoreError> {
        let mut tables = self.enter()?;
        if tables
            .inquiries
            .iter()
            .any(|i| i.order_number == inquiry.order_number)
        {
            return Err(StoreError::DuplicateOrderNumber(inquiry.order_number.clone()));
        }
        tables.inquiries.push(inquiry.clone());
        Ok(())
    }

    async fn find_inquiry(&self, id: Uuid) -> Result<Option<Inquiry>, StoreError> {
        let tables = self.enter()?;
        Ok(tables.inquiries.iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_order_number(
        &self,
        order_number: &OrderNumber,
    ) -> Result<Option<Inquiry>, StoreError> {
        let tables = self.enter()?;
        Ok(tables
            .inquiries
            .iter()
            .find(|i| i.order_number == order_number.as_str())
            .cloned())
    }

    async fn find_latest_by_email(&self, email: &str) -> Result<Option<Inquiry>, StoreError> {
        let tables = self.enter()?;
        Ok(tables
            .inquiries
            .iter()
            .filter(|i| i.email == email)
            .max_by_key(|i| i.created_at)
            .cloned())
    }

    async fn list_inquiries(&self, filter: &InquiryFilter) -> Result<Vec<Inquiry>, StoreError> {
        let tables = self.enter()?;
        let mut rows: Vec<Inquiry> = tables
            .inquiries
            .iter()
            .filter(|i| filter.status.is_none_or(|s| i.order_status == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows
            .into_iter()
            .skip(filter.offset.max(0) as usize)
            .take(filter.limit.max(0) as usize)
            .collect())
    }

    async fn commit_status_change(
        &self,
        inquiry_id: Uuid,
        change: &StatusChange,
    ) -> Result<CommittedChange, StoreError> {
        let mut tables = self.enter()?;
        let now = tables
            .tracking
            .iter()
            .filter(|e| e.inquiry_id == inquiry_id)
            .map(|e| e.created_at)
            .max()
            .map_or_else(Utc::now, |last| Utc::now().max(last));

        let inquiry = tables
            .inquiries
            .iter_mut()
            .find(|i| i.id == inquiry_id)
            .ok_or(StoreError::InquiryNotFound(inquiry_id))?;
        let previous_status = inquiry.order_status;
        inquiry.apply(&change.update);
        let inquiry = inquiry.clone();

        let event = change
            .event_for(previous_status)
            .map(|e| e.into_event(inquiry_id, now));
        if let Some(ref event) = event {
            tables.tracking.push(event.clone());
        }

        Ok(CommittedChange {
            inquiry,
            previous_status,
            event,
        })
    }
}

#[async_trait]
impl TrackingLog for MemoryStore {
    async fn list_events(&self, inquiry_id: Uuid) -> Result<Vec<TrackingEvent>, StoreError> {
        let tables = self.enter()?;
        // The table is append-only, so insertion order is commit order
        Ok(tables
            .tracking
            .iter()
            .filter(|e| e.inquiry_id == inquiry_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let tables = self.enter()?;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.enter()?;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn has_role(&self, user_id: Uuid, role: AppRole) -> Result<bool, StoreError> {
        let tables = self.enter()?;
        Ok(tables.roles.contains(&(user_id, role)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};
    use shared::models::{InquiryUpdate, NewInquiry};
    use shared::order::OrderStatus;

    fn new_inquiry(email: &str, number: &str, created_at: DateTime<Utc>) -> Inquiry {
        NewInquiry {
            name: "Ravi".into(),
            company: None,
            email: email.into(),
            country: "India".into(),
            product_interest: None,
            moq: None,
            message: "Belts".into(),
        }
        .into_inquiry(&OrderNumber::parse(number).unwrap(), created_at)
    }

    fn change(status: OrderStatus) -> StatusChange {
        StatusChange {
            update: InquiryUpdate {
                order_status: status,
                tracking_number: None,
                estimated_delivery: None,
                admin_notes: None,
            },
            message: None,
            actor: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_order_number_rejected() {
        let store = MemoryStore::new();
        let now = Utc::now();
        store
            .insert_inquiry(&new_inquiry("a@x.com", "LCI-20250101-0001", now))
            .await
            .unwrap();
        let err = store
            .insert_inquiry(&new_inquiry("b@x.com", "LCI-20250101-0001", now))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateOrderNumber(_)));
    }

    #[tokio::test]
    async fn test_latest_by_email_picks_newest() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let older = new_inquiry("a@x.com", "LCI-20250101-0001", now - Duration::days(2));
        let newer = new_inquiry("a@x.com", "LCI-20250103-0002", now);
        store.insert_inquiry(&newer).await.unwrap();
        store.insert_inquiry(&older).await.unwrap();

        let found = store.find_latest_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, newer.id);
        assert!(store.find_latest_by_email("A@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_status_change_keeps_inquiry_and_log_consistent() {
        let store = MemoryStore::new();
        let inquiry = new_inquiry("a@x.com", "LCI-20250101-0001", Utc::now());
        store.insert_inquiry(&inquiry).await.unwrap();

        let committed = store
            .commit_status_change(inquiry.id, &change(OrderStatus::Confirmed))
            .await
            .unwrap();
        assert_eq!(committed.previous_status, OrderStatus::Pending);
        assert_eq!(committed.inquiry.order_status, OrderStatus::Confirmed);

        let events = store.list_events(inquiry.id).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].status, committed.inquiry.order_status);

        // Same status, no message: nothing appended
        store
            .commit_status_change(inquiry.id, &change(OrderStatus::Confirmed))
            .await
            .unwrap();
        assert_eq!(store.list_events(inquiry.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_inquiry_is_not_found() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        let err = store
            .commit_status_change(id, &change(OrderStatus::Shipped))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InquiryNotFound(found) if found == id));
    }

    #[tokio::test]
    async fn test_later_commit_with_lagging_clock_stays_latest() {
        let store = MemoryStore::new();
        let inquiry = new_inquiry("a@x.com", "LCI-20250101-0001", Utc::now());
        store.insert_inquiry(&inquiry).await.unwrap();

        store
            .commit_status_change(inquiry.id, &change(OrderStatus::Shipped))
            .await
            .unwrap();
        // The first writer's clock ran ahead of the second one's
        store.lock().tracking[0].created_at = Utc::now() + Duration::minutes(5);

        let committed = store
            .commit_status_change(inquiry.id, &change(OrderStatus::Cancelled))
            .await
            .unwrap();
        assert_eq!(committed.inquiry.order_status, OrderStatus::Cancelled);

        let events = store.list_events(inquiry.id).await.unwrap();
        assert_eq!(events.len(), 2);
        let latest = events.last().unwrap();
        assert_eq!(latest.status, committed.inquiry.order_status);
        assert!(events.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_and_counts() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(store.find_latest_by_email("a@x.com").await.is_err());
        assert_eq!(store.call_count(), 1);
    }

    #[tokio::test]
    async fn test_list_filters_and_pages_newest_first() {
        let store = MemoryStore::new();
        let now = Utc::now();
        for (i, n) in ["LCI-20250101-0001", "LCI-20250101-0002", "LCI-20250101-0003"]
            .iter()
            .enumerate()
        {
            store
                .insert_inquiry(&new_inquiry("a@x.com", n, now + Duration::minutes(i as i64)))
                .await
                .unwrap();
        }
        let page = store
            .list_inquiries(&InquiryFilter {
                status: Some(OrderStatus::Pending),
                limit: 2,
                offset: 0,
            })
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].order_number, "LCI-20250101-0003");

        let shipped = store
            .list_inquiries(&InquiryFilter {
                status: Some(OrderStatus::Shipped),
                limit: 10,
                offset: 0,
            })
            .await
            .unwrap();
        assert!(shipped.is_empty());
    }
}
