//! Token verification for protected admin surfaces.

use course_shop_core::AdminProfile;
use tracing::instrument;

use crate::client::BackendClient;
use crate::session::SessionStore;

/// Result of checking the stored admin token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The token is valid; the profile has been refreshed in the store.
    Authenticated(AdminProfile),
    /// No usable token. The store has been cleared.
    RedirectToLogin,
}

/// Verify the stored token against the backend's profile endpoint.
///
/// - No token: `RedirectToLogin` without any network call.
/// - Token accepted: the returned profile is cached in the store.
/// - Any failure, including the backend being unreachable or the store
///   failing: the store is cleared and the admin must sign in again.
///
/// Runs on every protected request; nothing is cached across requests.
#[instrument(skip_all)]
pub async fn verify_admin<S: SessionStore>(store: &S, client: &BackendClient) -> GuardOutcome {
    let token = match store.token().await {
        Ok(Some(token)) => token,
        Ok(None) => return GuardOutcome::RedirectToLogin,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read admin session");
            clear(store).await;
            return GuardOutcome::RedirectToLogin;
        }
    };

    match client.profile(&token).await {
        Ok(admin) => {
            if let Err(e) = store.save_profile(admin.clone()).await {
                tracing::warn!(error = %e, "Failed to cache admin profile");
            }
            GuardOutcome::Authenticated(admin)
        }
        Err(e) => {
            if e.is_unauthorized() {
                tracing::info!("Admin token rejected, signing out");
            } else {
                tracing::warn!(error = %e, "Admin token verification failed, signing out");
            }
            clear(store).await;
            GuardOutcome::RedirectToLogin
        }
    }
}

async fn clear<S: SessionStore>(store: &S) {
    if let Err(e) = store.clear().await {
        tracing::error!(error = %e, "Failed to clear admin session");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::BackendConfig;
    use crate::session::MemorySessionStore;

    #[tokio::test]
    async fn test_no_token_redirects_without_network() {
        // Port 9 (discard) on a TEST-NET address: any request would fail, but
        // none is made when the store is empty.
        let config = BackendConfig::new("http://192.0.2.1:9/api", Duration::from_millis(50)).unwrap();
        let client = BackendClient::new(&config).unwrap();
        let store = MemorySessionStore::new();

        assert_eq!(verify_admin(&store, &client).await, GuardOutcome::RedirectToLogin);
        assert_eq!(client.requests_sent(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_backend_clears_token() {
        let config = BackendConfig::new("http://127.0.0.1:1/api", Duration::from_millis(500)).unwrap();
        let client = BackendClient::new(&config).unwrap();
        let store = MemorySessionStore::with_token("stale");

        assert_eq!(verify_admin(&store, &client).await, GuardOutcome::RedirectToLogin);
        assert_eq!(client.requests_sent(), 1);
        assert!(store.token().await.unwrap().is_none());
    }
}
