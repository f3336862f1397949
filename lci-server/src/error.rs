//! Service-layer error type
//!
//! `ServiceError` bridges storage errors (`StoreError`) and the API-layer
//! error (`AppError`) so handlers can use `?` without repeating
//! log-then-map boilerplate.

use shared::error::{AppError, ErrorCode};

use crate::store::StoreError;

/// Service-layer error
///
/// - `Store`: persistence failures (logged, mapped to a generic 500)
/// - `App`: business-rule errors (transparent pass-through to client)
#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
    App(AppError),
}

impl ServiceError {
    /// Convert to `AppError`, replacing storage failures with `message`
    pub fn into_app_error_with(self, message: &str) -> AppError {
        match self {
            ServiceError::App(app_err) => app_err,
            ServiceError::Store(store_err) => {
                tracing::error!(error = %store_err, "Service storage error");
                AppError::with_message(ErrorCode::InternalError, message)
            }
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        ServiceError::Store(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        e.into_app_error_with(ErrorCode::InternalError.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_detail_is_never_echoed() {
        let err = ServiceError::from(StoreError::Unavailable(
            "connection refused to 10.0.0.5:5432".into(),
        ));
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::InternalError);
        assert_eq!(app.message, "An unexpected error occurred");
    }

    #[test]
    fn test_custom_internal_message() {
        let err = ServiceError::from(StoreError::Unavailable("boom".into()));
        let app = err.into_app_error_with("Failed to search for order");
        assert_eq!(app.message, "Failed to search for order");
    }

    #[test]
    fn test_business_errors_pass_through() {
        let err = ServiceError::from(AppError::new(ErrorCode::OrderNotFound));
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::OrderNotFound);
    }
}
