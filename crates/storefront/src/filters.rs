//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Renders ASCII digits as Bengali digits.
///
/// Usage in templates: `{{ testimonial.rating|bn_digits }}`
#[askama::filter_fn]
pub fn bn_digits(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(course_shop_core::types::money::to_bengali_digits(
        &value.to_string(),
    ))
}

/// Renders a referral code as the `?ref=` query of an order link.
///
/// Usage in templates: `{{ code|referral_query }}`
#[askama::filter_fn]
pub fn referral_query(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(ref_query(&value.to_string()))
}

fn ref_query(code: &str) -> String {
    let encoded: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("ref", code)
        .finish();
    format!("?{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_query_escapes_reserved_characters() {
        assert_eq!(ref_query("SELL42"), "?ref=SELL42");
        assert_eq!(ref_query("A&B #1+"), "?ref=A%26B+%231%2B");
    }
}
