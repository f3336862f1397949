//! Authentication and request gating

pub mod admin_auth;
pub mod identity;
pub mod password;
pub mod rate_limit;

pub use admin_auth::{AdminIdentity, admin_auth_middleware};
pub use identity::{AuthUser, IdentityResolver, JwtIdentityResolver, JwtKeys};
pub use rate_limit::RateLimiter;
