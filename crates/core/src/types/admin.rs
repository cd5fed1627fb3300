//! Admin identity as reported by the backend.

use serde::{Deserialize, Serialize};

use super::id::AdminId;

/// The signed-in administrator.
///
/// Returned by both the login and profile endpoints and cached in the
/// session so page chrome can show who is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AdminId>,
    pub name: String,
    pub email: String,
}

impl AdminProfile {
    /// First letter of the name, for avatar badges.
    #[must_use]
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_id() {
        let admin: AdminProfile =
            serde_json::from_str(r#"{"name":"Rahim","email":"rahim@example.com"}"#).unwrap();
        assert!(admin.id.is_none());
        assert_eq!(admin.initial(), "R");
    }

    #[test]
    fn test_deserialize_mongo_id() {
        let admin: AdminProfile = serde_json::from_str(
            r#"{"_id":"65aa","name":"karim","email":"karim@example.com","role":"admin"}"#,
        )
        .unwrap();
        assert_eq!(admin.id.as_ref().unwrap().as_str(), "65aa");
        assert_eq!(admin.initial(), "K");
    }
}
