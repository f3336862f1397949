//! Admin gate for privileged endpoints
//!
//! Checks run in a fixed order and stop at the first failure:
//! 1. bearer token present, else 401 "Missing authorization header"
//! 2. token resolves to a user, else 401 "Unauthorized"
//! 3. user holds `admin` in the role-assignment store, else 403

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::HeaderMap;
use shared::error::AppError;
use shared::models::AppRole;
use uuid::Uuid;

use crate::state::AppState;

/// Administrator identity injected into request extensions
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub user_id: Uuid,
    pub email: String,
}

/// Raw `Authorization` header value, if any
fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
}

/// Middleware that authenticates the caller and requires the admin role
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = authorization(request.headers()).ok_or_else(AppError::not_authenticated)?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(AppError::unauthorized)?;

    let user = state.identity.resolve(token).await.map_err(|e| {
        tracing::debug!("Identity resolution failed: {e}");
        AppError::unauthorized()
    })?;

    // A failed role lookup and a missing role look the same to the caller
    match state.roles.has_role(user.id, AppRole::Admin).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(user_id = %user.id, "Non-admin attempted privileged call");
            return Err(AppError::admin_required());
        }
        Err(e) => {
            tracing::error!(user_id = %user.id, "Role check failed: {e}");
            return Err(AppError::admin_required());
        }
    }

    request.extensions_mut().insert(AdminIdentity {
        user_id: user.id,
        email: user.email,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(authorization(&headers), None);

        headers.insert(http::header::AUTHORIZATION, "   ".parse().unwrap());
        assert_eq!(authorization(&headers), None);

        headers.insert(http::header::AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(authorization(&headers), Some("Bearer abc"));
    }
}
