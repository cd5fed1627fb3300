//! Errors returned by [`BackendClient`](crate::BackendClient).

use course_shop_core::ApiErrorCode;
use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a response (connect failure, timeout,
    /// connection reset).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with `success: false` or a non-2xx status.
    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        code: ApiErrorCode,
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Form data could not be encoded into a request.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl BackendError {
    /// Structured failure category, for application errors only.
    #[must_use]
    pub const fn code(&self) -> Option<ApiErrorCode> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns `true` when the backend was unreachable.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Returns `true` when the bearer token was rejected.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Api {
                code: ApiErrorCode::Unauthorized,
                ..
            }
        )
    }

    /// Returns `true` when the addressed record does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Api {
                code: ApiErrorCode::NotFound,
                ..
            }
        )
    }

    /// The backend's own message, for application errors only.
    #[must_use]
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_accessors() {
        let err = BackendError::Api {
            status: 409,
            code: ApiErrorCode::DuplicateTransaction,
            message: "Order with this transaction ID already exists".to_string(),
        };
        assert_eq!(err.code(), Some(ApiErrorCode::DuplicateTransaction));
        assert!(!err.is_transport());
        assert!(!err.is_unauthorized());
        assert_eq!(
            err.to_string(),
            "API error: 409 - Order with this transaction ID already exists"
        );
    }

    #[test]
    fn test_empty_api_message_is_none() {
        let err = BackendError::Api {
            status: 500,
            code: ApiErrorCode::Other,
            message: String::new(),
        };
        assert!(err.api_message().is_none());
    }
}
