//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Auth
//! GET  /login                  - Login page (signed-in admins go to the dashboard)
//! POST /login                  - Exchange credentials for a backend token
//! POST /logout                 - Forget the token
//!
//! # Dashboard
//! GET  /                       - Counts of payment methods and sellers
//!
//! # Payment methods
//! GET  /payment-methods        - List, see [`payment_methods`] for dialogs
//!
//! # Sellers
//! GET  /sellers                - List, see [`sellers`] for dialogs
//! ```
//!
//! Resource dialogs are real pages: each dialog URL renders the list with
//! the dialog open, and forms post back to the resource URL.

use axum::Router;
use course_shop_backend::BackendError;
use course_shop_core::{AdminProfile, Banner, StatusFilter};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::middleware::take_flash;
use crate::state::AppState;

pub mod auth;
pub mod dashboard;
pub mod payment_methods;
pub mod sellers;

/// Build the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(payment_methods::router())
        .merge(sellers::router())
}

/// Signed-in admin as shown in the header.
#[derive(Debug, Clone)]
pub struct AdminView {
    pub name: String,
    pub email: String,
    pub initial: String,
}

impl From<&AdminProfile> for AdminView {
    fn from(admin: &AdminProfile) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.clone(),
            initial: admin.initial(),
        }
    }
}

/// Search and status filter of a list page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: String,
}

impl ListQuery {
    /// Parsed status filter; unknown values show everything.
    #[must_use]
    pub fn status_filter(&self) -> StatusFilter {
        self.status.parse().unwrap_or_default()
    }

    /// `?search=..&status=..` for links that keep the current filter, or an
    /// empty string when nothing is filtered.
    #[must_use]
    pub fn query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if !self.search.is_empty() {
            serializer.append_pair("search", &self.search);
        }
        let status = self.status_filter();
        if status != StatusFilter::All {
            serializer.append_pair("status", status.as_str());
        }

        let query = serializer.finish();
        if query.is_empty() {
            query
        } else {
            format!("?{query}")
        }
    }

    /// Whether `option` is the selected status.
    #[must_use]
    pub fn is_status(&self, option: &str) -> bool {
        self.status_filter().as_str() == option
    }
}

/// The backend's message for an application error, or `fallback` when the
/// backend could not be reached or sent none.
#[must_use]
pub fn failure_message(err: &BackendError, fallback: &str) -> String {
    err.api_message().unwrap_or(fallback).to_string()
}

/// Turn the result of a mutation into the dialog outcome.
///
/// A rejected token is returned as an error so the admin is sent to sign in
/// again; every other failure becomes the error banner text.
///
/// # Errors
///
/// Returns `AppError::Backend` when the backend rejected the admin token.
pub fn outcome<T>(
    result: std::result::Result<T, BackendError>,
    success: impl FnOnce(T) -> String,
    fallback: &str,
) -> Result<std::result::Result<String, String>> {
    match result {
        Ok(value) => Ok(Ok(success(value))),
        Err(e) if e.is_unauthorized() => Err(AppError::Backend(e)),
        Err(e) => {
            tracing::warn!(error = %e, "{fallback}");
            Ok(Err(failure_message(&e, fallback)))
        }
    }
}

/// The single banner a page shows.
///
/// An explicit banner wins over a flashed one. The flash is consumed either
/// way.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn page_banner(session: &Session, explicit: Option<Banner>) -> Result<Option<Banner>> {
    let flashed = take_flash(session).await?;
    Ok(explicit.or(flashed))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn query(search: &str, status: &str) -> ListQuery {
        ListQuery {
            search: search.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_query_string_empty_when_unfiltered() {
        assert_eq!(ListQuery::default().query_string(), "");
        assert_eq!(query("", "all").query_string(), "");
    }

    #[test]
    fn test_query_string_encodes_search() {
        assert_eq!(
            query("rahim uddin", "active").query_string(),
            "?search=rahim+uddin&status=active"
        );
    }

    #[test]
    fn test_unknown_status_shows_all() {
        let query = query("", "archived");
        assert_eq!(query.status_filter(), StatusFilter::All);
        assert!(query.is_status("all"));
        assert_eq!(query.query_string(), "");
    }

    #[test]
    fn test_outcome_uses_backend_message() {
        let err = BackendError::Api {
            status: 400,
            code: course_shop_core::ApiErrorCode::Validation,
            message: "Seller with this email already exists".to_string(),
        };
        let result = outcome::<()>(Err(err), |()| String::new(), "Failed to add seller").unwrap();
        assert_eq!(result, Err("Seller with this email already exists".to_string()));
    }

    #[test]
    fn test_outcome_propagates_rejected_token() {
        let err = BackendError::Api {
            status: 401,
            code: course_shop_core::ApiErrorCode::Unauthorized,
            message: "Token expired".to_string(),
        };
        assert!(outcome::<()>(Err(err), |()| String::new(), "Failed to add seller").is_err());
    }
}
