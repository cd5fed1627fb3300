//! Authentication route handlers for admin.
//!
//! Email and password are exchanged with the backend for a bearer token.
//! The token never reaches the browser; it lives in the server-side session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use course_shop_backend::{GuardOutcome, SessionStore, verify_admin};
use course_shop_core::validation::validate_login;
use course_shop_core::{FieldErrors, LoginForm};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::TowerSessionStore;
use crate::state::AppState;

const LOGIN_FAILED: &str = "Login failed";
const SERVER_ERROR: &str = "Server error. Please try again.";

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    /// Email to pre-fill; the password is never echoed back.
    pub email: String,
    pub errors: FieldErrors,
    /// Error not tied to a field, such as rejected credentials.
    pub general_error: Option<String>,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
}

/// Render the login page.
///
/// GET /login
///
/// An admin whose stored token still verifies goes straight to the
/// dashboard.
#[instrument(skip_all)]
pub async fn login_page(State(state): State<AppState>, session: Session) -> Response {
    let store = TowerSessionStore::new(session);
    if let GuardOutcome::Authenticated(_) = verify_admin(&store, state.backend()).await {
        return Redirect::to("/").into_response();
    }

    LoginTemplate {
        email: String::new(),
        errors: FieldErrors::new(),
        general_error: None,
    }
    .into_response()
}

/// Exchange credentials for a token.
///
/// POST /login
#[instrument(skip_all, fields(email = %form.email.trim()))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let errors = validate_login(&form);
    if !errors.is_empty() {
        let page = LoginTemplate {
            email: form.email,
            errors,
            general_error: None,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    match state.backend().login(form.email.trim(), &form.password).await {
        Ok(admin_session) => {
            set_sentry_user(&admin_session.admin);
            tracing::info!(admin = %admin_session.admin.email, "Admin signed in");

            let store = TowerSessionStore::new(session);
            if let Err(e) = store.save(admin_session).await {
                tracing::error!(error = %e, "Failed to store admin session");
                return Ok(login_failed(form.email, SERVER_ERROR, StatusCode::INTERNAL_SERVER_ERROR));
            }
            Ok(Redirect::to("/").into_response())
        }
        Err(e) if e.is_transport() => {
            tracing::error!(error = %e, "Backend unreachable during login");
            Ok(login_failed(form.email, SERVER_ERROR, StatusCode::BAD_GATEWAY))
        }
        Err(e) => {
            tracing::info!(error = %e, "Admin login rejected");
            let message = e.api_message().unwrap_or(LOGIN_FAILED).to_string();
            Ok(login_failed(form.email, &message, StatusCode::UNAUTHORIZED))
        }
    }
}

fn login_failed(email: String, message: &str, status: StatusCode) -> Response {
    let page = LoginTemplate {
        email,
        errors: FieldErrors::new(),
        general_error: Some(message.to_string()),
    };
    (status, page).into_response()
}

/// Logout and clear session.
///
/// POST /logout
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Response> {
    let store = TowerSessionStore::new(session.clone());
    if let Err(e) = store.clear().await {
        tracing::warn!(error = %e, "Failed to clear admin session");
    }
    session.flush().await?;
    clear_sentry_user();

    Ok(Redirect::to("/login").into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_page_renders_errors_without_password() {
        let form = LoginForm {
            email: "rahim@example".to_string(),
            password: "12345".to_string(),
        };
        let page = LoginTemplate {
            email: form.email.clone(),
            errors: validate_login(&form),
            general_error: None,
        };
        let html = page.render().unwrap();

        assert!(html.contains("value=\"rahim@example\""));
        assert!(html.contains("Please enter a valid email"));
        assert!(html.contains("Password must be at least 6 characters"));
        assert!(!html.contains("12345"));
    }

    #[test]
    fn test_general_error_is_shown() {
        let html = LoginTemplate {
            email: String::new(),
            errors: FieldErrors::new(),
            general_error: Some("Invalid email or password".to_string()),
        }
        .render()
        .unwrap();
        assert!(html.contains("Invalid email or password"));
    }
}
