//! Per-IP rate limiting for the public endpoints

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::{AppError, ErrorCode};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::state::AppState;

struct IpEntry {
    count: u32,
    window_start: Instant,
}

#[derive(Clone, Default)]
pub struct RateLimiter {
    /// route name -> (IP -> entry)
    inner: Arc<Mutex<HashMap<&'static str, HashMap<String, IpEntry>>>>,
    /// Key on the first X-Forwarded-For entry instead of the peer address
    trust_forwarded_for: bool,
}

impl RateLimiter {
    /// `trust_forwarded_for` must only be set behind a proxy that overwrites
    /// the header; otherwise any client picks its own key.
    pub fn new(trust_forwarded_for: bool) -> Self {
        Self {
            trust_forwarded_for,
            ..Self::default()
        }
    }

    /// Returns `true` if the request is allowed, `false` if rate-limited.
    pub async fn check(
        &self,
        route: &'static str,
        ip: &str,
        max_requests: u32,
        window_secs: u64,
    ) -> bool {
        let mut map = self.inner.lock().await;
        let route_map = map.entry(route).or_default();
        let now = Instant::now();

        let entry = route_map.entry(ip.to_owned()).or_insert_with(|| IpEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start).as_secs() >= window_secs {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count += 1;
        entry.count <= max_requests
    }

    /// Remove entries older than 5 minutes
    pub async fn cleanup(&self) {
        let mut map = self.inner.lock().await;
        let cutoff = std::time::Duration::from_secs(300);
        let now = Instant::now();

        for route_map in map.values_mut() {
            route_map.retain(|_, entry| now.duration_since(entry.window_start) < cutoff);
        }

        map.retain(|_, route_map| !route_map.is_empty());
    }
}

/// Client IP: the peer address, or the first X-Forwarded-For entry when the
/// proxy in front of us is trusted.
fn extract_ip(request: &Request, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for
        && let Some(forwarded) = request.headers().get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
        && let Some(first) = val.split(',').next()
    {
        let ip = first.trim();
        if !ip.is_empty() {
            return ip.to_owned();
        }
    }

    request
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

async fn limit(
    state: &AppState,
    route: &'static str,
    max_requests: u32,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = extract_ip(&request, state.rate_limiter.trust_forwarded_for);
    if !state.rate_limiter.check(route, &ip, max_requests, 60).await {
        tracing::warn!(route, ip = %ip, "Rate limit exceeded");
        return Err(AppError::new(ErrorCode::TooManyRequests));
    }
    Ok(next.run(request).await)
}

/// Order lookup: 20 requests/minute per IP
pub async fn lookup_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    limit(&state, "track_order", 20, request, next).await
}

/// Contact form: 5 requests/minute per IP
pub async fn inquiry_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    limit(&state, "inquiry", 5, request, next).await
}

/// Admin login: 5 requests/minute per IP
pub async fn login_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    limit(&state, "login", 5, request, next).await
}
