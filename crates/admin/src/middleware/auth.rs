//! Authentication extractor for admin.
//!
//! Every protected handler takes [`RequireAdminAuth`], which runs the
//! backend token check on each request.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use course_shop_backend::{GuardOutcome, SessionStore, verify_admin};
use course_shop_core::AdminProfile;
use secrecy::SecretString;
use tower_sessions::Session;

use super::session::TowerSessionStore;
use crate::error::set_sentry_user;
use crate::state::AppState;

/// The admin a request is acting for and the token to act with.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub profile: AdminProfile,
    pub token: SecretString,
}

/// Extractor that requires admin authentication.
///
/// The stored token is verified against the backend on every request. If
/// it is missing or rejected the session is cleared and the admin is sent
/// to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.profile.name)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Error returned when admin authentication is required but the user is not logged in.
#[derive(Debug)]
pub enum AdminAuthRejection {
    /// Redirect to login page.
    RedirectToLogin,
    /// No session layer is installed.
    Unauthorized,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAdminAuth {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AdminAuthRejection::Unauthorized)?;
        let store = TowerSessionStore::new(session);

        let GuardOutcome::Authenticated(profile) = verify_admin(&store, state.backend()).await
        else {
            return Err(AdminAuthRejection::RedirectToLogin);
        };

        let token = store
            .token()
            .await
            .ok()
            .flatten()
            .ok_or(AdminAuthRejection::RedirectToLogin)?;

        set_sentry_user(&profile);
        Ok(Self(CurrentAdmin { profile, token }))
    }
}
