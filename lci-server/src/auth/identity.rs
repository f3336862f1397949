//! Identity tokens for staff users
//!
//! A token proves who the caller is, nothing more. Roles are never read from
//! the token; the admin gate re-checks the role-assignment store on every call.

use async_trait::async_trait;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::store::{StoreError, UserDirectory};

/// JWT claims for staff identity
#[derive(Debug, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// User ID
    pub sub: String,
    /// User email
    pub email: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Caller identity resolved from a bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("token subject is not a user id")]
    MalformedSubject,
    #[error("token subject does not exist")]
    UnknownUser,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Signing material for identity tokens
#[derive(Clone)]
pub struct JwtKeys {
    secret: Arc<str>,
    expiry_hours: i64,
}

impl JwtKeys {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            secret: Arc::from(secret),
            expiry_hours,
        }
    }

    /// Create a token for a staff user
    pub fn create_token(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = IdentityClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: (now + chrono::Duration::hours(self.expiry_hours)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Verify signature and expiry
    pub fn decode(&self, token: &str) -> Result<IdentityClaims, jsonwebtoken::errors::Error> {
        let data = jsonwebtoken::decode::<IdentityClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

/// Resolves a bearer token to a user
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<AuthUser, IdentityError>;
}

/// Validates the JWT, then confirms the subject still exists
pub struct JwtIdentityResolver {
    keys: JwtKeys,
    users: Arc<dyn UserDirectory>,
}

impl JwtIdentityResolver {
    pub fn new(keys: JwtKeys, users: Arc<dyn UserDirectory>) -> Self {
        Self { keys, users }
    }
}

#[async_trait]
impl IdentityResolver for JwtIdentityResolver {
    async fn resolve(&self, token: &str) -> Result<AuthUser, IdentityError> {
        let claims = self.keys.decode(token)?;
        let id = Uuid::parse_str(&claims.sub).map_err(|_| IdentityError::MalformedSubject)?;
        let user = self
            .users
            .find_user(id)
            .await?
            .ok_or(IdentityError::UnknownUser)?;
        Ok(AuthUser {
            id: user.id,
            email: user.email,
        })
    }
}
