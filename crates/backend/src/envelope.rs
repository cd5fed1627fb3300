//! The response envelope shared by every backend endpoint.
//!
//! ```json
//! { "success": true, "paymentMethods": [ ... ] }
//! { "success": false, "message": "Payment method not found", "code": "NOT_FOUND" }
//! ```
//!
//! Payload fields sit next to the envelope fields, so successful responses
//! are decoded straight into the payload type.

use course_shop_core::ApiErrorCode;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::BackendError;

/// Envelope fields common to every response.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EnvelopeHead {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub code: Option<String>,
}

/// Maximum body length echoed into logs and error messages.
const BODY_PREVIEW_CHARS: usize = 200;

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

/// Category for a failure without a recognized code or message.
const fn code_for_status(status: StatusCode) -> ApiErrorCode {
    match status.as_u16() {
        401 | 403 => ApiErrorCode::Unauthorized,
        404 => ApiErrorCode::NotFound,
        422 => ApiErrorCode::Validation,
        _ => ApiErrorCode::Other,
    }
}

/// Decode a response body into `T`, turning envelope failures into
/// [`BackendError::Api`].
///
/// # Errors
///
/// - `BackendError::Api` if `success` is `false` or the status is not 2xx
/// - `BackendError::Parse` if a successful body is not the expected JSON
pub fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, BackendError> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) if status.is_success() => {
            tracing::error!(
                error = %e,
                body = %preview(body),
                "Backend returned a non-JSON success body"
            );
            return Err(BackendError::Parse(e.to_string()));
        }
        // Proxies and crashes produce HTML or empty error bodies
        Err(_) => Value::Null,
    };

    let head = EnvelopeHead::deserialize(&value).unwrap_or_default();

    if head.success == Some(false) || !status.is_success() {
        let message = head.message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .map_or_else(|| format!("HTTP {status}"), str::to_string)
        });
        let code = match head.code.as_deref().and_then(ApiErrorCode::from_code) {
            Some(code) => code,
            None => match ApiErrorCode::classify(None, &message) {
                ApiErrorCode::Other => code_for_status(status),
                code => code,
            },
        };

        tracing::debug!(
            status = %status,
            code = %code,
            message = %message,
            "Backend rejected request"
        );

        return Err(BackendError::Api {
            status: status.as_u16(),
            code,
            message,
        });
    }

    T::deserialize(&value).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %preview(body),
            "Failed to decode backend payload"
        );
        BackendError::Parse(e.to_string())
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Greeting {
        greeting: String,
    }

    #[test]
    fn test_success_payload_sits_beside_envelope() {
        let body = r#"{"success":true,"message":"ok","greeting":"hello"}"#;
        let payload: Greeting = decode(StatusCode::OK, body).unwrap();
        assert_eq!(payload.greeting, "hello");
    }

    #[test]
    fn test_success_false_with_2xx_is_api_error() {
        let body = r#"{"success":false,"message":"Invalid or inactive payment method"}"#;
        let err = decode::<Greeting>(StatusCode::OK, body).unwrap_err();
        assert_eq!(err.code(), Some(ApiErrorCode::InactivePaymentMethod));
        assert_eq!(err.api_message(), Some("Invalid or inactive payment method"));
    }

    #[test]
    fn test_structured_code_is_used() {
        let body = r#"{"success":false,"message":"Already used","code":"DUPLICATE_TRANSACTION"}"#;
        let err = decode::<Greeting>(StatusCode::BAD_REQUEST, body).unwrap_err();
        assert_eq!(err.code(), Some(ApiErrorCode::DuplicateTransaction));
    }

    #[test]
    fn test_status_fallback_for_unclassified_failures() {
        let body = r#"{"success":false,"message":"Token expired"}"#;
        let err = decode::<Greeting>(StatusCode::UNAUTHORIZED, body).unwrap_err();
        assert!(err.is_unauthorized());

        let err = decode::<Greeting>(StatusCode::NOT_FOUND, "<html>nope</html>").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.api_message(), Some("Not Found"));
    }

    #[test]
    fn test_malformed_success_body_is_parse_error() {
        let err = decode::<Greeting>(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, BackendError::Parse(_)));

        let err = decode::<Greeting>(StatusCode::OK, r#"{"success":true}"#).unwrap_err();
        assert!(matches!(err, BackendError::Parse(_)));
    }
}
