//! Seller endpoints.

use course_shop_core::{FormMode, Seller, SellerForm, SellerId, SellerStats};
use reqwest::Method;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde::de::IgnoredAny;
use tracing::instrument;

use super::BackendClient;
use crate::error::BackendError;

/// JSON body for seller create and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub commission_rate: f64,
    /// Sent on update only; new sellers take the backend default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl SellerInput {
    /// Build the body from a validated form.
    #[must_use]
    pub fn from_form(form: &SellerForm, mode: FormMode) -> Self {
        Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            commission_rate: form.commission_rate().unwrap_or_default(),
            is_active: (mode == FormMode::Edit).then_some(form.is_active),
        }
    }
}

#[derive(Deserialize)]
struct SellersPayload {
    sellers: Vec<Seller>,
}

#[derive(Deserialize)]
struct SellerPayload {
    seller: Seller,
}

#[derive(Deserialize)]
struct StatsPayload {
    stats: SellerStats,
}

impl BackendClient {
    /// Every seller.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the token is rejected.
    #[instrument(skip_all)]
    pub async fn all_sellers(&self, token: &SecretString) -> Result<Vec<Seller>, BackendError> {
        let request = self.request(Method::GET, &["sellers", "admin", "all"], Some(token))?;
        let payload: SellersPayload = self.execute(request).await?;
        Ok(payload.sellers)
    }

    /// Create a seller. The backend assigns the seller code and URL.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the input.
    #[instrument(skip_all, fields(email = %input.email))]
    pub async fn create_seller(
        &self,
        token: &SecretString,
        input: &SellerInput,
    ) -> Result<Seller, BackendError> {
        let request = self
            .request(Method::POST, &["sellers", "admin", "create"], Some(token))?
            .json(input);
        let payload: SellerPayload = self.execute(request).await?;
        Ok(payload.seller)
    }

    /// Update a seller.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the backend rejects the input.
    #[instrument(skip(self, token, input), fields(id = %id))]
    pub async fn update_seller(
        &self,
        token: &SecretString,
        id: &SellerId,
        input: &SellerInput,
    ) -> Result<Seller, BackendError> {
        let request = self
            .request(
                Method::PUT,
                &["sellers", "admin", "update", id.as_str()],
                Some(token),
            )?
            .json(input);
        let payload: SellerPayload = self.execute(request).await?;
        Ok(payload.seller)
    }

    /// Delete a seller.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the record does not exist.
    #[instrument(skip(self, token), fields(id = %id))]
    pub async fn delete_seller(&self, token: &SecretString, id: &SellerId) -> Result<(), BackendError> {
        let request = self.request(
            Method::DELETE,
            &["sellers", "admin", "delete", id.as_str()],
            Some(token),
        )?;
        let _: IgnoredAny = self.execute(request).await?;
        Ok(())
    }

    /// Flip a seller between active and inactive.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the record does not exist.
    #[instrument(skip(self, token), fields(id = %id))]
    pub async fn toggle_seller(
        &self,
        token: &SecretString,
        id: &SellerId,
    ) -> Result<Seller, BackendError> {
        let request = self.request(
            Method::PATCH,
            &["sellers", "admin", "toggle-status", id.as_str()],
            Some(token),
        )?;
        let payload: SellerPayload = self.execute(request).await?;
        Ok(payload.seller)
    }

    /// Order and commission figures for one seller.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the record does not exist.
    #[instrument(skip(self, token), fields(id = %id))]
    pub async fn seller_stats(
        &self,
        token: &SecretString,
        id: &SellerId,
    ) -> Result<SellerStats, BackendError> {
        let request = self.request(
            Method::GET,
            &["sellers", "admin", "stats", id.as_str()],
            Some(token),
        )?;
        let payload: StatsPayload = self.execute(request).await?;
        Ok(payload.stats)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_input_omits_is_active() {
        let form = SellerForm {
            name: " Karim ".to_string(),
            email: "karim@example.com".to_string(),
            phone: "01812345678".to_string(),
            commission_rate: "12.5".to_string(),
            is_active: false,
        };

        let json = serde_json::to_value(SellerInput::from_form(&form, FormMode::Create)).unwrap();
        assert_eq!(json["name"], "Karim");
        assert_eq!(json["commissionRate"], 12.5);
        assert!(json.get("isActive").is_none());

        let json = serde_json::to_value(SellerInput::from_form(&form, FormMode::Edit)).unwrap();
        assert_eq!(json["isActive"], false);
    }
}
