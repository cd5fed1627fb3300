//! Session middleware configuration for admin.
//!
//! Sets up in-memory sessions using tower-sessions with strict cookie
//! settings (SameSite=Strict, 24hr inactivity expiry). The session holds the
//! backend bearer token, the cached admin profile and a one-shot banner.

use course_shop_backend::session::{ADMIN_DATA_KEY, ADMIN_TOKEN_KEY};
use course_shop_backend::{AdminSession, SessionStore, SessionStoreError};
use course_shop_core::{AdminProfile, Banner};
use secrecy::{ExposeSecret, SecretString};
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::AdminConfig;

/// Session cookie name for admin.
pub const SESSION_COOKIE_NAME: &str = "cs_admin_session";

/// Key holding the banner shown on the next rendered page.
pub const FLASH_KEY: &str = "flash";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with an in-memory store.
///
/// Sessions do not survive a restart; admins sign in again afterwards.
#[must_use]
pub fn create_session_layer(config: &AdminConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}

/// [`SessionStore`] backed by the request's tower-sessions session.
#[derive(Clone)]
pub struct TowerSessionStore {
    session: Session,
}

impl TowerSessionStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

fn storage_error(e: tower_sessions::session::Error) -> SessionStoreError {
    match e {
        tower_sessions::session::Error::SerdeJson(e) => {
            SessionStoreError::Serialization(e.to_string())
        }
        other => SessionStoreError::Storage(other.to_string()),
    }
}

impl SessionStore for TowerSessionStore {
    async fn token(&self) -> Result<Option<SecretString>, SessionStoreError> {
        let token: Option<String> = self
            .session
            .get(ADMIN_TOKEN_KEY)
            .await
            .map_err(storage_error)?;
        Ok(token.map(SecretString::from))
    }

    async fn profile(&self) -> Result<Option<AdminProfile>, SessionStoreError> {
        self.session
            .get(ADMIN_DATA_KEY)
            .await
            .map_err(storage_error)
    }

    async fn save(&self, session: AdminSession) -> Result<(), SessionStoreError> {
        // New ID on sign-in so a pre-login cookie can't be reused
        self.session.cycle_id().await.map_err(storage_error)?;
        self.session
            .insert(ADMIN_TOKEN_KEY, session.token.expose_secret())
            .await
            .map_err(storage_error)?;
        self.session
            .insert(ADMIN_DATA_KEY, &session.admin)
            .await
            .map_err(storage_error)
    }

    async fn save_profile(&self, admin: AdminProfile) -> Result<(), SessionStoreError> {
        self.session
            .insert(ADMIN_DATA_KEY, &admin)
            .await
            .map_err(storage_error)
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        self.session
            .remove::<String>(ADMIN_TOKEN_KEY)
            .await
            .map_err(storage_error)?;
        self.session
            .remove::<AdminProfile>(ADMIN_DATA_KEY)
            .await
            .map_err(storage_error)?;
        Ok(())
    }
}

/// Store a banner to show on the next page render.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_flash(
    session: &Session,
    banner: &Banner,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(FLASH_KEY, banner).await
}

/// Take the pending banner, if any. It is shown once.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn take_flash(session: &Session) -> Result<Option<Banner>, tower_sessions::session::Error> {
    session.remove(FLASH_KEY).await
}
