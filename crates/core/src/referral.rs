//! Seller referral codes.
//!
//! The storefront never checks whether a code exists; the backend decides
//! when the order is created.

/// Normalize the `ref` query value: empty means "no referral", anything
/// else passes through unchanged.
#[must_use]
pub fn referral_code(raw: Option<&str>) -> Option<String> {
    raw.filter(|code| !code.is_empty()).map(str::to_owned)
}
