#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use chrono::{DateTime, Utc};
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use shared::models::{AppRole, Inquiry, NewInquiry};
use shared::order::OrderNumber;
use tower::ServiceExt;
use uuid::Uuid;

use lci_server::api::create_router;
use lci_server::auth::JwtKeys;
use lci_server::auth::password::hash_password;
use lci_server::email::{MailError, Mailer, OutgoingEmail};
use lci_server::state::AppState;
use lci_server::store::{InquiryStore, MemoryStore, RoleStore, StoreError};

pub const TRACK_URL: &str = "https://lecrafto.example/track-order";

/// Captures outgoing email instead of sending it
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail: AtomicBool,
}

impl RecordingMailer {
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Notifications are dispatched in the background; wait for them.
    pub async fn wait_for(&self, count: usize) -> Vec<OutgoingEmail> {
        for _ in 0..200 {
            let sent = self.sent();
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("expected {count} emails, got {}", self.sent().len());
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(MailError("provider rejected the message".into()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Role store that counts lookups, optionally failing them
pub struct CountingRoles {
    inner: Arc<MemoryStore>,
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl CountingRoles {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RoleStore for CountingRoles {
    async fn has_role(&self, user_id: Uuid, role: AppRole) -> Result<bool, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("role store offline".into()));
        }
        self.inner.has_role(user_id, role).await
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub mailer: Arc<RecordingMailer>,
    pub roles: Arc<CountingRoles>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let mailer = Arc::new(RecordingMailer::default());
        let roles = Arc::new(CountingRoles {
            inner: store.clone(),
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        });

        let mut state = AppState::from_store(
            store.clone(),
            mailer.clone(),
            JwtKeys::new("integration-secret", 1),
            TRACK_URL,
        );
        state.roles = roles.clone();

        Self {
            router: create_router(state.clone()),
            state,
            store,
            mailer,
            roles,
        }
    }

    /// Rebuild the router after swapping a seam on `state`
    pub fn rebuild(&mut self) {
        self.router = create_router(self.state.clone());
    }

    /// Staff user with the given password, optionally an admin
    pub fn staff(&self, email: &str, password: &str, admin: bool) -> Uuid {
        let hash = hash_password(password).unwrap();
        let user = self.store.add_user(email, &hash);
        if admin {
            self.store.grant_role(user.id, AppRole::Admin);
        }
        user.id
    }

    /// Bearer token for a fresh admin
    pub fn admin_token(&self) -> String {
        let id = self.staff("admin@lecrafto.com", "admin-pass", true);
        self.state.jwt.create_token(id, "admin@lecrafto.com").unwrap()
    }

    /// Bearer token for a fresh non-admin staff user
    pub fn staff_token(&self) -> String {
        let id = self.staff("staff@lecrafto.com", "staff-pass", false);
        self.state.jwt.create_token(id, "staff@lecrafto.com").unwrap()
    }

    /// Insert a pending inquiry straight into the store
    pub async fn seed_inquiry(
        &self,
        email: &str,
        order_number: &str,
        created_at: DateTime<Utc>,
    ) -> Inquiry {
        let mut inquiry = NewInquiry {
            name: "Meera Patil".into(),
            company: Some("Patil Exports".into()),
            email: email.into(),
            country: "India".into(),
            product_interest: Some("Leather wallets".into()),
            moq: Some(250),
            message: "Looking for a quote".into(),
        }
        .into_inquiry(&OrderNumber::parse(order_number).unwrap(), created_at);
        inquiry.admin_notes = Some("VIP customer, prefers air freight".into());
        self.store.insert_inquiry(&inquiry).await.unwrap();
        inquiry
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn post_json(
        &self,
        uri: &str,
        body: Value,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn track(&self, query: &str) -> (StatusCode, Value) {
        self.post_json(
            "/api/track-order",
            serde_json::json!({ "searchQuery": query }),
            None,
        )
        .await
    }
}
