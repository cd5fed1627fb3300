//! Customer-facing toasts for the order flow, keyed by outcome.
//!
//! Backend failures are mapped through [`ApiErrorCode`] so the wording here
//! never depends on the backend's English messages.

use std::borrow::Cow;

use serde::Serialize;

use crate::error_code::ApiErrorCode;

/// Shown when the active payment-method list is empty.
pub const NO_ACTIVE_PAYMENT_METHODS: &str = "কোনো সক্রিয় পেমেন্ট পদ্ধতি পাওয়া যায়নি";

/// Shown when the active payment-method list cannot be loaded.
pub const PAYMENT_METHODS_LOAD_FAILED: &str = "পেমেন্ট পদ্ধতি লোড করতে সমস্যা হয়েছে";

/// Visual tone of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

/// A titled notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: Cow<'static, str>,
    pub body: Cow<'static, str>,
}

impl Toast {
    const fn error(title: &'static str, body: Cow<'static, str>) -> Self {
        Self {
            kind: ToastKind::Error,
            title: Cow::Borrowed(title),
            body,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.kind, ToastKind::Success)
    }
}

/// The order was accepted.
#[must_use]
pub fn order_placed(order_number: &str) -> Toast {
    Toast {
        kind: ToastKind::Success,
        title: Cow::Borrowed("অর্ডার সফল হয়েছে! 🎉"),
        body: Cow::Owned(format!(
            "আপনার অর্ডার নম্বর: {order_number}। কোর্স শীঘ্রই ইমেইলে পাবেন।"
        )),
    }
}

/// Client-side validation failed.
#[must_use]
pub const fn invalid_form() -> Toast {
    Toast::error(
        "ফর্ম পূরণে ত্রুটি",
        Cow::Borrowed("অনুগ্রহ করে সকল তথ্য সঠিকভাবে পূরণ করুন"),
    )
}

/// The backend could not be reached.
#[must_use]
pub const fn network_error() -> Toast {
    Toast::error(
        "নেটওয়ার্ক সমস্যা",
        Cow::Borrowed("ইন্টারনেট সংযোগ পরীক্ষা করে আবার চেষ্টা করুন।"),
    )
}

/// The backend rejected the order.
///
/// `server_message` is shown verbatim only for unclassified failures.
#[must_use]
pub fn order_rejected(code: ApiErrorCode, server_message: &str) -> Toast {
    match code {
        ApiErrorCode::DuplicateTransaction => Toast::error(
            "Transaction ID ইতিমধ্যে ব্যবহৃত",
            Cow::Borrowed(
                "এই Transaction ID দিয়ে ইতিমধ্যে একটি অর্ডার রয়েছে। নতুন Transaction ID দিন।",
            ),
        ),
        ApiErrorCode::InactivePaymentMethod => Toast::error(
            "পেমেন্ট পদ্ধতি সমস্যা",
            Cow::Borrowed(
                "নির্বাচিত পেমেন্ট পদ্ধতি বর্তমানে সক্রিয় নেই। অন্য পদ্ধতি নির্বাচন করুন।",
            ),
        ),
        _ if server_message.trim().is_empty() => Toast::error(
            "অর্ডার করতে সমস্যা",
            Cow::Borrowed("অজানা ত্রুটি হয়েছে। আবার চেষ্টা করুন।"),
        ),
        _ => Toast::error(
            "অর্ডার করতে সমস্যা",
            Cow::Owned(server_message.to_owned()),
        ),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_placed_includes_number() {
        let toast = order_placed("ORD-1001");
        assert!(toast.is_success());
        assert!(toast.body.contains("ORD-1001"));
    }

    #[test]
    fn test_duplicate_transaction_toast() {
        let toast = order_rejected(ApiErrorCode::DuplicateTransaction, "ignored");
        assert_eq!(toast.title, "Transaction ID ইতিমধ্যে ব্যবহৃত");
        assert!(!toast.body.contains("ignored"));
    }

    #[test]
    fn test_inactive_payment_method_toast() {
        let toast = order_rejected(ApiErrorCode::InactivePaymentMethod, "");
        assert_eq!(toast.title, "পেমেন্ট পদ্ধতি সমস্যা");
    }

    #[test]
    fn test_generic_toast_uses_server_message() {
        let toast = order_rejected(ApiErrorCode::Validation, "Customer email is invalid");
        assert_eq!(toast.title, "অর্ডার করতে সমস্যা");
        assert_eq!(toast.body, "Customer email is invalid");
    }

    #[test]
    fn test_generic_toast_without_message() {
        let toast = order_rejected(ApiErrorCode::Other, "  ");
        assert_eq!(toast.body, "অজানা ত্রুটি হয়েছে। আবার চেষ্টা করুন।");
    }
}
