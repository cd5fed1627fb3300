//! Payment methods customers pay through (bKash, Nagad, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::admin::AdminProfile;
use super::id::{AdminId, PaymentMethodId};

/// A mobile-banking account customers send the course fee to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    #[serde(rename = "_id", alias = "id")]
    pub id: PaymentMethodId,
    pub name: String,
    /// Account number shown to customers.
    pub number: String,
    /// Step-by-step payment instructions shown under the number.
    pub instructions: String,
    #[serde(default)]
    pub image: Option<PaymentMethodImage>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<CreatedBy>,
}

impl PaymentMethod {
    /// URL of the logo, if one has been uploaded.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image
            .as_ref()
            .map(|image| image.url.as_str())
            .filter(|url| !url.is_empty())
    }
}

/// Uploaded logo for a payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodImage {
    pub url: String,
}

/// Who created a record: either a bare ID or the populated admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatedBy {
    Admin(AdminProfile),
    Id(AdminId),
}

impl CreatedBy {
    /// Human-readable label for the creator.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Admin(admin) => &admin.name,
            Self::Id(id) => id.as_str(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_document() {
        let json = r#"{
            "_id": "66b1",
            "name": "bKash",
            "number": "01712345678",
            "instructions": "Send Money to this number",
            "image": { "url": "https://cdn.example.com/bkash.png", "publicId": "pm/bkash" },
            "isActive": true,
            "createdAt": "2024-08-01T10:00:00.000Z",
            "updatedAt": "2024-08-02T10:00:00.000Z",
            "createdBy": { "_id": "65aa", "name": "Rahim", "email": "rahim@example.com" },
            "__v": 0
        }"#;

        let method: PaymentMethod = serde_json::from_str(json).unwrap();
        assert_eq!(method.id.as_str(), "66b1");
        assert!(method.is_active);
        assert_eq!(method.image_url(), Some("https://cdn.example.com/bkash.png"));
        assert_eq!(method.created_by.unwrap().label(), "Rahim");
    }

    #[test]
    fn test_deserialize_minimal_document() {
        let json = r#"{"id":"1","name":"Nagad","number":"01811111111","instructions":"x","createdBy":"65aa"}"#;
        let method: PaymentMethod = serde_json::from_str(json).unwrap();
        assert!(!method.is_active);
        assert!(method.image_url().is_none());
        assert_eq!(method.created_by.unwrap(), CreatedBy::Id(AdminId::new("65aa")));
    }
}
