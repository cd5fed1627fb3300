//! Token verification through `BackendClient` and the session stores.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use course_shop_backend::{
    BackendClient, BackendConfig, GuardOutcome, MemorySessionStore, SessionStore, verify_admin,
};
use course_shop_integration_tests::{ADMIN_EMAIL, ADMIN_NAME, ADMIN_PASSWORD, FakeBackend};
use secrecy::ExposeSecret;

fn client_for(backend: &FakeBackend) -> BackendClient {
    let config = BackendConfig::new(backend.url(), Duration::from_secs(5)).unwrap();
    BackendClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_no_token_redirects_without_network_call() {
    let backend = FakeBackend::spawn().await;
    let client = client_for(&backend);
    let store = MemorySessionStore::new();

    assert_eq!(verify_admin(&store, &client).await, GuardOutcome::RedirectToLogin);
    assert_eq!(client.requests_sent(), 0);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_login_then_verify_caches_profile() {
    let backend = FakeBackend::spawn().await;
    let client = client_for(&backend);
    let store = MemorySessionStore::new();

    let session = client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    assert!(!session.token.expose_secret().is_empty());
    store.save(session).await.unwrap();

    match verify_admin(&store, &client).await {
        GuardOutcome::Authenticated(admin) => assert_eq!(admin.name, ADMIN_NAME),
        GuardOutcome::RedirectToLogin => panic!("valid token was rejected"),
    }
    assert_eq!(store.profile().await.unwrap().unwrap().email, ADMIN_EMAIL);
}

#[tokio::test]
async fn test_rejected_token_clears_store() {
    let backend = FakeBackend::spawn().await;
    let client = client_for(&backend);
    let store = MemorySessionStore::with_token(backend.issue_token());

    backend.revoke_tokens();

    assert_eq!(verify_admin(&store, &client).await, GuardOutcome::RedirectToLogin);
    assert!(store.token().await.unwrap().is_none());
    assert_eq!(backend.count("GET /api/admin/profile"), 1);
}

#[tokio::test]
async fn test_wrong_password_is_invalid_credentials() {
    let backend = FakeBackend::spawn().await;
    let client = client_for(&backend);

    let err = client.login(ADMIN_EMAIL, "nope-nope").await.unwrap_err();

    assert!(!err.is_transport());
    assert_eq!(err.api_message(), Some("Invalid credentials"));
}
