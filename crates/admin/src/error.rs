//! Unified error handling for admin.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use course_shop_backend::BackendError;
use course_shop_core::AdminProfile;
use thiserror::Error;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend request failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Session storage failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Upload body could not be read.
    #[error("Upload error: {0}")]
    Multipart(#[from] MultipartError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // A token that expired mid-request sends the admin back to sign in
        if matches!(&self, Self::Backend(err) if err.is_unauthorized()) {
            tracing::info!("Backend rejected admin token");
            return Redirect::to("/login").into_response();
        }

        let client_side = match &self {
            Self::Backend(err) => err.is_not_found(),
            Self::Multipart(_) => true,
            Self::Session(_) => false,
        };
        if !client_side {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        match &self {
            Self::Backend(err) if err.is_not_found() => {
                (StatusCode::NOT_FOUND, "Not found").into_response()
            }
            Self::Backend(_) => (StatusCode::BAD_GATEWAY, "Backend unavailable").into_response(),
            Self::Session(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            Self::Multipart(err) => (err.status(), err.body_text()).into_response(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from the signed-in admin.
pub fn set_sentry_user(admin: &AdminProfile) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: admin.id.as_ref().map(ToString::to_string),
            email: Some(admin.email.clone()),
            username: Some(admin.name.clone()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}
