//! Where the admin bearer token lives between requests.
//!
//! The admin binary keeps it in a tower-sessions session, the CLI in a file
//! and tests in memory. Everything that needs the token goes through
//! [`SessionStore`] instead of reaching for a particular backend.

use std::future::Future;
use std::sync::Arc;

use course_shop_core::AdminProfile;
use secrecy::SecretString;
use thiserror::Error;
use tokio::sync::RwLock;

/// Key holding the bearer token.
pub const ADMIN_TOKEN_KEY: &str = "admin_token";

/// Key holding the last-known admin profile.
pub const ADMIN_DATA_KEY: &str = "admin_data";

/// Errors raised by a session store.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// The underlying storage failed.
    #[error("Session storage error: {0}")]
    Storage(String),

    /// Stored data could not be (de)serialized.
    #[error("Session data error: {0}")]
    Serialization(String),
}

/// A signed-in admin: the bearer token and who it belongs to.
#[derive(Clone)]
pub struct AdminSession {
    pub token: SecretString,
    pub admin: AdminProfile,
}

impl std::fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSession")
            .field("token", &"[REDACTED]")
            .field("admin", &self.admin)
            .finish()
    }
}

/// Persistence for the admin token and profile.
pub trait SessionStore: Send + Sync {
    /// The stored bearer token, if any.
    fn token(&self) -> impl Future<Output = Result<Option<SecretString>, SessionStoreError>> + Send;

    /// The last-known admin profile, if any.
    fn profile(&self)
    -> impl Future<Output = Result<Option<AdminProfile>, SessionStoreError>> + Send;

    /// Store a freshly issued session, replacing any previous one.
    fn save(
        &self,
        session: AdminSession,
    ) -> impl Future<Output = Result<(), SessionStoreError>> + Send;

    /// Refresh the cached profile without touching the token.
    fn save_profile(
        &self,
        admin: AdminProfile,
    ) -> impl Future<Output = Result<(), SessionStoreError>> + Send;

    /// Forget the token and profile.
    fn clear(&self) -> impl Future<Output = Result<(), SessionStoreError>> + Send;
}

/// In-process store, shared between clones.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<RwLock<Option<AdminSessionSlot>>>,
}

#[derive(Clone)]
struct AdminSessionSlot {
    token: Option<SecretString>,
    admin: Option<AdminProfile>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(AdminSessionSlot {
                token: Some(SecretString::from(token.into())),
                admin: None,
            }))),
        }
    }
}

impl SessionStore for MemorySessionStore {
    async fn token(&self) -> Result<Option<SecretString>, SessionStoreError> {
        Ok(self.inner.read().await.as_ref().and_then(|slot| slot.token.clone()))
    }

    async fn profile(&self) -> Result<Option<AdminProfile>, SessionStoreError> {
        Ok(self.inner.read().await.as_ref().and_then(|slot| slot.admin.clone()))
    }

    async fn save(&self, session: AdminSession) -> Result<(), SessionStoreError> {
        *self.inner.write().await = Some(AdminSessionSlot {
            token: Some(session.token),
            admin: Some(session.admin),
        });
        Ok(())
    }

    async fn save_profile(&self, admin: AdminProfile) -> Result<(), SessionStoreError> {
        let mut slot = self.inner.write().await;
        match slot.as_mut() {
            Some(slot) => slot.admin = Some(admin),
            None => {
                *slot = Some(AdminSessionSlot {
                    token: None,
                    admin: Some(admin),
                });
            }
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        *self.inner.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn admin() -> AdminProfile {
        AdminProfile {
            id: None,
            name: "Rahim".to_string(),
            email: "rahim@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_then_clear() {
        let store = MemorySessionStore::new();
        assert!(store.token().await.unwrap().is_none());

        store
            .save(AdminSession {
                token: SecretString::from("tok"),
                admin: admin(),
            })
            .await
            .unwrap();
        assert_eq!(store.token().await.unwrap().unwrap().expose_secret(), "tok");
        assert_eq!(store.profile().await.unwrap(), Some(admin()));

        store.clear().await.unwrap();
        assert!(store.token().await.unwrap().is_none());
        assert!(store.profile().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemorySessionStore::with_token("tok");
        let other = store.clone();
        other.save_profile(admin()).await.unwrap();

        assert_eq!(store.profile().await.unwrap(), Some(admin()));
        assert!(store.token().await.unwrap().is_some());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = AdminSession {
            token: SecretString::from("super-secret-token"),
            admin: admin(),
        };
        assert!(!format!("{session:?}").contains("super-secret-token"));
    }
}
