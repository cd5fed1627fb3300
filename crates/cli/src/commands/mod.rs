//! CLI command implementations.
//!
//! Every command talks to the backend through [`BackendClient`] and reads the
//! admin token from the [`FileSessionStore`].

pub mod auth;
pub mod payment_methods;
pub mod sellers;

use course_shop_backend::{
    BackendClient, BackendConfig, BackendError, ConfigError, SessionStore, SessionStoreError,
};
use secrecy::SecretString;
use thiserror::Error;

use crate::session_file::FileSessionStore;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Backend settings are missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend request failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Session file could not be read or written.
    #[error(transparent)]
    Session(#[from] SessionStoreError),

    /// No token stored.
    #[error("Not signed in. Run `cs-cli login` first")]
    NotSignedIn,

    /// The backend rejected the stored token.
    #[error("Session expired. Run `cs-cli login` again")]
    SessionExpired,

    /// Input failed validation before anything was sent.
    #[error("{0}")]
    Invalid(String),
}

/// Backend client plus the session file, shared by every command.
pub struct Context {
    pub client: BackendClient,
    pub store: FileSessionStore,
}

impl Context {
    /// Build from `BACKEND_API_URL`, `BACKEND_TIMEOUT_SECS` and
    /// `COURSE_SHOP_SESSION_FILE`.
    ///
    /// # Errors
    ///
    /// Returns error if the backend settings are missing or invalid.
    pub fn from_env() -> Result<Self, CommandError> {
        let config = BackendConfig::from_env()?;
        Ok(Self {
            client: BackendClient::new(&config)?,
            store: FileSessionStore::from_env(),
        })
    }

    /// The stored token, or [`CommandError::NotSignedIn`].
    async fn token(&self) -> Result<SecretString, CommandError> {
        self.store.token().await?.ok_or(CommandError::NotSignedIn)
    }

    /// Map a backend failure, signing out when the token was rejected.
    async fn backend_failure(&self, err: BackendError) -> CommandError {
        if !err.is_unauthorized() {
            return CommandError::Backend(err);
        }
        if let Err(e) = self.store.clear().await {
            tracing::warn!(error = %e, "Failed to clear session file");
        }
        CommandError::SessionExpired
    }
}

fn status_label(is_active: bool) -> &'static str {
    if is_active { "active" } else { "inactive" }
}
