//! Admin login and profile.

use course_shop_core::AdminProfile;
use reqwest::Method;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::BackendClient;
use crate::error::BackendError;
use crate::session::AdminSession;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginPayload {
    token: String,
    admin: AdminProfile,
}

#[derive(Deserialize)]
struct ProfilePayload {
    admin: AdminProfile,
}

impl BackendClient {
    /// Exchange admin credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Api` when the credentials are rejected.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminSession, BackendError> {
        let request = self
            .request(Method::POST, &["admin", "login"], None)?
            .json(&LoginRequest { email, password });

        let payload: LoginPayload = self.execute(request).await?;
        Ok(AdminSession {
            token: SecretString::from(payload.token),
            admin: payload.admin,
        })
    }

    /// Fetch the profile the token belongs to.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Api` with `ApiErrorCode::Unauthorized` when the
    /// token is invalid or expired.
    #[instrument(skip_all)]
    pub async fn profile(&self, token: &SecretString) -> Result<AdminProfile, BackendError> {
        let request = self.request(Method::GET, &["admin", "profile"], Some(token))?;
        let payload: ProfilePayload = self.execute(request).await?;
        Ok(payload.admin)
    }
}
