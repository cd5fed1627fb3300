//! Taka amounts using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount in Bangladeshi Taka.
///
/// Backend documents carry money as plain JSON numbers; this wrapper keeps
/// them exact and owns the two display formats used across the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taka(Decimal);

impl Taka {
    /// Zero taka.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount from a decimal value.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create an amount from whole taka.
    #[must_use]
    pub fn from_whole(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// The underlying decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format with the taka sign and Latin digits, e.g. `৳1,234.50`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("৳{}", group_thousands(self.0))
    }

    /// Format with Bengali digits and the word "taka", e.g. `৩,০০০ টাকা`.
    #[must_use]
    pub fn display_bn(&self) -> String {
        format!("{} টাকা", to_bengali_digits(&group_thousands(self.0)))
    }
}

impl fmt::Display for Taka {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<Decimal> for Taka {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

/// Render `amount` rounded to paisa with comma-separated thousands.
fn group_thousands(amount: Decimal) -> String {
    let rendered = amount.round_dp(2).normalize().to_string();
    let (sign, unsigned) = rendered
        .strip_prefix('-')
        .map_or(("", rendered.as_str()), |rest| ("-", rest));
    let (whole, fraction) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(w, f)| (w, Some(f)));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction:0<2}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Replace ASCII digits with Bengali digits, leaving everything else intact.
#[must_use]
pub fn to_bengali_digits(s: &str) -> String {
    s.chars()
        .map(|ch| match ch.to_digit(10) {
            // U+09E6 is BENGALI DIGIT ZERO; the ten digits are contiguous
            Some(d) => char::from_u32(0x09E6 + d).unwrap_or(ch),
            _ => ch,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Taka::from_whole(0).display(), "৳0");
        assert_eq!(Taka::from_whole(999).display(), "৳999");
        assert_eq!(Taka::from_whole(3000).display(), "৳3,000");
        assert_eq!(Taka::from_whole(1_234_567).display(), "৳1,234,567");
    }

    #[test]
    fn test_display_keeps_paisa() {
        let amount = Taka::new(Decimal::from_str("1234.5").unwrap());
        assert_eq!(amount.display(), "৳1,234.50");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(Taka::from_whole(-4500).display(), "৳-4,500");
    }

    #[test]
    fn test_display_bn() {
        assert_eq!(Taka::from_whole(3000).display_bn(), "৩,০০০ টাকা");
    }

    #[test]
    fn test_deserialize_from_json_number() {
        let amount: Taka = serde_json::from_str("2500").unwrap();
        assert_eq!(amount, Taka::from_whole(2500));
    }

    #[test]
    fn test_to_bengali_digits() {
        assert_eq!(to_bengali_digits("01712345678"), "০১৭১২৩৪৫৬৭৮");
        assert_eq!(to_bengali_digits("ORD-42"), "ORD-৪২");
    }
}
