//! API routes for lci-server

pub mod admin;
pub mod health;
pub mod inquiry;
pub mod order_update;
pub mod track;

use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use shared::error::{AppError, ErrorCode};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::admin_auth_middleware;
use crate::auth::rate_limit::{inquiry_rate_limit, login_rate_limit, lookup_rate_limit};
use crate::state::AppState;

pub(crate) type ApiResult<T> = Result<Json<T>, AppError>;

/// Unwrap a JSON body, turning a malformed one into a 400
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!("Rejected request body: {rejection}");
            Err(AppError::with_message(
                ErrorCode::InvalidRequest,
                "Invalid request body",
            ))
        }
    }
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Customer order lookup (public, no auth)
    let lookup = Router::new()
        .route("/api/track-order", post(track::track_order))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            lookup_rate_limit,
        ));

    // Contact form (public, no auth)
    let contact = Router::new()
        .route("/api/inquiries", post(inquiry::submit_inquiry))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            inquiry_rate_limit,
        ));

    let login = Router::new()
        .route("/api/admin/login", post(admin::login))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            login_rate_limit,
        ));

    // Admin console (bearer token + admin role)
    let admin = Router::new()
        .route("/api/admin/order-update", post(order_update::update_order))
        .route("/api/admin/inquiries", get(admin::list_inquiries))
        .route(
            "/api/admin/inquiries/{id}/tracking",
            get(admin::inquiry_tracking),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(lookup)
        .merge(contact)
        .merge(login)
        .merge(admin)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
