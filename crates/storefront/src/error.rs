//! Errors that escape a storefront handler.
//!
//! The order form renders its own failures as toasts. What reaches
//! [`AppError`] is a backend failure on a page that has nothing better to
//! show, which is reported to Sentry and answered with a short message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use course_shop_backend::BackendError;
use thiserror::Error;

/// Shown when the backend fails underneath a page.
const SERVICE_UNAVAILABLE: &str = "সার্ভারে সমস্যা হচ্ছে। কিছুক্ষণ পর আবার চেষ্টা করুন।";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let Self::Backend(err) = &self;

        if err.is_not_found() {
            return (StatusCode::NOT_FOUND, "Not found").into_response();
        }

        let event_id = sentry::capture_error(&self);
        tracing::error!(error = %self, sentry_event_id = %event_id, "Storefront request failed");

        (StatusCode::BAD_GATEWAY, SERVICE_UNAVAILABLE).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Leave a breadcrumb on the Sentry trail for a customer action.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };
    breadcrumb.data.extend(
        data.iter()
            .map(|(key, value)| ((*key).to_string(), serde_json::Value::from(*value))),
    );

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use course_shop_core::ApiErrorCode;

    use super::*;

    fn status_of(err: BackendError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn test_missing_record_is_not_found() {
        let missing = BackendError::Api {
            status: 404,
            code: ApiErrorCode::NotFound,
            message: "Order not found".to_string(),
        };
        assert_eq!(status_of(missing), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_other_failures_are_bad_gateway() {
        let broken = BackendError::Parse("unexpected body".to_string());
        assert_eq!(status_of(broken), StatusCode::BAD_GATEWAY);

        let rejected = BackendError::Api {
            status: 500,
            code: ApiErrorCode::Other,
            message: "boom".to_string(),
        };
        assert_eq!(status_of(rejected), StatusCode::BAD_GATEWAY);
    }
}
