//! Structured backend error codes.
//!
//! The backend sends a machine-readable `code` next to `success: false`.
//! Older deployments only send a human-readable `message`, so
//! [`ApiErrorCode::classify`] falls back to recognizing known wording.

use serde::{Deserialize, Serialize};

/// Application-level failure categories reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorCode {
    /// An order with this transaction ID already exists.
    DuplicateTransaction,
    /// The chosen payment method is unknown or switched off.
    InactivePaymentMethod,
    /// Login rejected.
    InvalidCredentials,
    /// Missing, invalid or expired bearer token.
    Unauthorized,
    NotFound,
    /// Server-side validation rejected the payload.
    #[serde(rename = "VALIDATION_ERROR")]
    Validation,
    /// Anything else.
    Other,
}

impl ApiErrorCode {
    /// Parse the envelope's `code` field.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DUPLICATE_TRANSACTION" => Some(Self::DuplicateTransaction),
            "INACTIVE_PAYMENT_METHOD" => Some(Self::InactivePaymentMethod),
            "INVALID_CREDENTIALS" => Some(Self::InvalidCredentials),
            "UNAUTHORIZED" => Some(Self::Unauthorized),
            "NOT_FOUND" => Some(Self::NotFound),
            "VALIDATION_ERROR" => Some(Self::Validation),
            _ => None,
        }
    }

    /// Wire representation of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateTransaction => "DUPLICATE_TRANSACTION",
            Self::InactivePaymentMethod => "INACTIVE_PAYMENT_METHOD",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound => "NOT_FOUND",
            Self::Validation => "VALIDATION_ERROR",
            Self::Other => "OTHER",
        }
    }

    /// Classify a failed response.
    ///
    /// A recognized `code` always wins. Without one, the message is matched
    /// against the backend's known wording.
    #[must_use]
    pub fn classify(code: Option<&str>, message: &str) -> Self {
        if let Some(code) = code.and_then(Self::from_code) {
            return code;
        }

        let message = message.to_lowercase();
        if message.contains("transaction id already exists") {
            Self::DuplicateTransaction
        } else if message.contains("invalid or inactive payment method") {
            Self::InactivePaymentMethod
        } else if message.contains("invalid credentials") {
            Self::InvalidCredentials
        } else {
            Self::Other
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_code_wins_over_message() {
        let code = ApiErrorCode::classify(
            Some("INACTIVE_PAYMENT_METHOD"),
            "Order with this transaction ID already exists",
        );
        assert_eq!(code, ApiErrorCode::InactivePaymentMethod);
    }

    #[test]
    fn test_message_fallback() {
        assert_eq!(
            ApiErrorCode::classify(None, "Order with this transaction ID already exists"),
            ApiErrorCode::DuplicateTransaction
        );
        assert_eq!(
            ApiErrorCode::classify(None, "Invalid or inactive payment method"),
            ApiErrorCode::InactivePaymentMethod
        );
        assert_eq!(
            ApiErrorCode::classify(Some("SOMETHING_NEW"), "Database unavailable"),
            ApiErrorCode::Other
        );
    }

    #[test]
    fn test_serde_matches_wire_codes() {
        for code in [
            ApiErrorCode::DuplicateTransaction,
            ApiErrorCode::InactivePaymentMethod,
            ApiErrorCode::InvalidCredentials,
            ApiErrorCode::Unauthorized,
            ApiErrorCode::NotFound,
            ApiErrorCode::Validation,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
            assert_eq!(ApiErrorCode::from_code(code.as_str()), Some(code));
        }
    }
}
