//! Course Shop Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::services::ServeDir;

use state::AppState;

/// Directory the `/static` route serves from, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/storefront/static";

/// Build the full storefront application.
///
/// Sentry layers are added by the binary so tests run without a client.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::StorefrontConfig;

    fn test_app() -> Router {
        // Nothing listens on port 1, so any backend call fails fast
        let config = StorefrontConfig::local("http://127.0.0.1:1/api").unwrap();
        app(AppState::new(config).unwrap())
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_home_renders_static_sections() {
        let response = test_app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("৩,০০০ টাকা"));
        assert!(html.contains("সত্যিই কি ১০ দিনে মনিটাইজেশন সম্ভব?"));
        assert!(html.contains("রহিম আহমেদ"));
    }

    #[tokio::test]
    async fn test_order_page_shows_blocking_error_when_backend_down() {
        let response = test_app()
            .oneshot(Request::get("/order?ref=S1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains(course_shop_core::messages::PAYMENT_METHODS_LOAD_FAILED));
        assert!(html.contains("href=\"/order?ref=S1\""));
    }

    #[tokio::test]
    async fn test_order_post_without_client_ip_is_rejected_by_limiter() {
        let response = test_app()
            .oneshot(
                Request::post("/order")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("name=Rahim"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_ne!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_copy_script_falls_back_when_clipboard_api_fails() {
        let script = include_str!("../static/js/copy.js");
        // Missing API and rejected writes both take the textarea path
        assert!(script.contains("!navigator.clipboard || !window.isSecureContext"));
        assert!(script.contains("document.execCommand(\"copy\")"));
        assert_eq!(script.matches("report(button, legacyCopy(text))").count(), 2);
        assert!(script.contains("copy-failed"));
    }
}
