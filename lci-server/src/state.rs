//! Application state for lci-server

use std::sync::Arc;

use crate::auth::{IdentityResolver, JwtIdentityResolver, JwtKeys, RateLimiter};
use crate::config::{Config, MailerKind};
use crate::email::{LogMailer, Mailer, SesMailer};
use crate::services::notify::Notifier;
use crate::store::{InquiryStore, MemoryStore, PgStore, RoleStore, TrackingLog, UserDirectory};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
///
/// Every storage dependency is a trait object so the same router runs
/// against PostgreSQL in production and the in-memory store in tests.
#[derive(Clone)]
pub struct AppState {
    /// Inquiry records
    pub inquiries: Arc<dyn InquiryStore>,
    /// Append-only tracking history
    pub tracking: Arc<dyn TrackingLog>,
    /// Staff accounts (login, identity resolution)
    pub users: Arc<dyn UserDirectory>,
    /// Role assignments, consulted on every privileged call
    pub roles: Arc<dyn RoleStore>,
    /// Bearer token → user
    pub identity: Arc<dyn IdentityResolver>,
    /// Customer email dispatch
    pub notifier: Notifier,
    /// Identity token signing keys
    pub jwt: JwtKeys,
    /// Rate limiter for the public routes
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Wire every seam to one backing store
    pub fn from_store<S>(
        store: Arc<S>,
        mailer: Arc<dyn Mailer>,
        jwt: JwtKeys,
        track_order_url: &str,
    ) -> Self
    where
        S: InquiryStore + TrackingLog + UserDirectory + RoleStore + 'static,
    {
        let users: Arc<dyn UserDirectory> = store.clone();
        Self {
            inquiries: store.clone(),
            tracking: store.clone(),
            roles: store,
            identity: Arc::new(JwtIdentityResolver::new(jwt.clone(), users.clone())),
            users,
            notifier: Notifier::new(mailer, track_order_url),
            jwt,
            rate_limiter: RateLimiter::default(),
        }
    }

    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let mailer: Arc<dyn Mailer> = match config.mailer {
            MailerKind::Ses => Arc::new(SesMailer::from_env(&config.ses_from_email).await),
            MailerKind::Log => Arc::new(LogMailer),
        };
        let jwt = JwtKeys::new(&config.jwt_secret, config.jwt_expiry_hours);

        let mut state = match config.database_url {
            Some(ref url) => {
                let store = PgStore::connect(url).await?;
                tracing::info!("Connected to PostgreSQL");
                Self::from_store(Arc::new(store), mailer, jwt, &config.track_order_url)
            }
            None if config.is_development() => {
                tracing::warn!(
                    "DATABASE_URL not set, using in-memory store (data is not persisted)"
                );
                Self::from_store(
                    Arc::new(MemoryStore::new()),
                    mailer,
                    jwt,
                    &config.track_order_url,
                )
            }
            None => {
                return Err(
                    format!("DATABASE_URL must be set in {} environment", config.environment)
                        .into(),
                );
            }
        };
        if config.trust_forwarded_for {
            tracing::info!("Rate limiting keys on X-Forwarded-For");
        }
        state.rate_limiter = RateLimiter::new(config.trust_forwarded_for);
        Ok(state)
    }
}
