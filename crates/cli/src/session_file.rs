//! File-backed admin session for the CLI.
//!
//! Holds the same two entries the admin panel keeps in its session: the
//! bearer token and the last-known admin profile. The file is rewritten on
//! every change and removed on logout.

use std::path::{Path, PathBuf};

use course_shop_backend::config::get_env_or_default;
use course_shop_backend::{AdminSession, SessionStore, SessionStoreError};
use course_shop_core::AdminProfile;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Environment variable overriding the session file location.
pub const SESSION_FILE_ENV: &str = "COURSE_SHOP_SESSION_FILE";

/// Session file used when `COURSE_SHOP_SESSION_FILE` is unset.
pub const DEFAULT_SESSION_FILE: &str = ".course-shop-session.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    admin_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    admin_data: Option<AdminProfile>,
}

/// [`SessionStore`] persisted as a small JSON file.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store at `COURSE_SHOP_SESSION_FILE`, or the default file in the
    /// working directory.
    pub fn from_env() -> Self {
        Self::new(get_env_or_default(SESSION_FILE_ENV, DEFAULT_SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<SessionFile, SessionStoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| SessionStoreError::Serialization(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SessionFile::default()),
            Err(e) => Err(SessionStoreError::Storage(e.to_string())),
        }
    }

    async fn write(&self, file: &SessionFile) -> Result<(), SessionStoreError> {
        let bytes = serde_json::to_vec_pretty(file)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| SessionStoreError::Storage(e.to_string()))?;

        // The token is a bearer credential; keep it owner-only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| SessionStoreError::Storage(e.to_string()))?;
        }

        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    async fn token(&self) -> Result<Option<SecretString>, SessionStoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.admin_token.map(SecretString::from))
    }

    async fn profile(&self) -> Result<Option<AdminProfile>, SessionStoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.admin_data)
    }

    async fn save(&self, session: AdminSession) -> Result<(), SessionStoreError> {
        let _guard = self.lock.lock().await;
        let file = SessionFile {
            admin_token: Some(session.token.expose_secret().to_string()),
            admin_data: Some(session.admin),
        };
        self.write(&file).await
    }

    async fn save_profile(&self, admin: AdminProfile) -> Result<(), SessionStoreError> {
        let _guard = self.lock.lock().await;
        let mut file = self.read().await?;
        file.admin_data = Some(admin);
        self.write(&file).await
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionStoreError::Storage(e.to_string())),
        }
    }
}
