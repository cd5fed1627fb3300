//! Search and status filtering for admin list views.
//!
//! The source collection is never mutated; filtering yields borrowed
//! references in the original order.

use crate::types::{PaymentMethod, Seller, StatusFilter};

/// A record that can be searched and filtered by status.
pub trait Searchable {
    /// Text fields the search term is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Whether the record is currently active.
    fn is_active(&self) -> bool;

    /// Returns `true` if any search field contains `needle`.
    ///
    /// `needle` must already be lowercase.
    fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Searchable for PaymentMethod {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.number.as_str(),
            self.instructions.as_str(),
        ]
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Searchable for Seller {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.seller_code.as_str(),
            self.phone.as_str(),
        ]
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Records matching `search` (case-insensitive substring) and `status`.
///
/// Surrounding whitespace in `search` is ignored. An empty search with
/// [`StatusFilter::All`] returns every record in order.
#[must_use]
pub fn filter<'a, T: Searchable>(items: &'a [T], search: &str, status: StatusFilter) -> Vec<&'a T> {
    let needle = search.trim().to_lowercase();
    items
        .iter()
        .filter(|item| status.matches(item.is_active()) && item.matches_search(&needle))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{PaymentMethodId, SellerId, Taka};

    fn method(id: &str, name: &str, number: &str, active: bool) -> PaymentMethod {
        PaymentMethod {
            id: PaymentMethodId::new(id),
            name: name.to_owned(),
            number: number.to_owned(),
            instructions: format!("Send money to {name}"),
            image: None,
            is_active: active,
            created_at: None,
            updated_at: None,
            created_by: None,
        }
    }

    fn seller(id: &str, name: &str, code: &str, active: bool) -> Seller {
        Seller {
            id: SellerId::new(id),
            name: name.to_owned(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "01812345678".to_owned(),
            commission_rate: 10.0,
            seller_code: code.to_owned(),
            seller_url: String::new(),
            is_active: active,
            total_sales: Taka::ZERO,
            created_at: None,
            updated_at: None,
        }
    }

    fn ids(items: &[&PaymentMethod]) -> Vec<String> {
        items.iter().map(|item| item.id.to_string()).collect()
    }

    #[test]
    fn test_empty_search_all_is_identity() {
        let methods = vec![
            method("3", "Rocket", "01911111111", false),
            method("1", "bKash", "01712345678", true),
            method("2", "Nagad", "01812345678", true),
        ];

        let result = filter(&methods, "", StatusFilter::All);
        assert_eq!(result.len(), methods.len());
        for (filtered, original) in result.iter().zip(&methods) {
            assert!(std::ptr::eq(*filtered, original));
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let methods = vec![
            method("1", "bKash", "01712345678", true),
            method("2", "Nagad", "01812345678", true),
        ];

        let result = filter(&methods, "BKASH", StatusFilter::All);
        assert_eq!(ids(&result), vec!["1"]);
    }

    #[test]
    fn test_search_matches_number_and_instructions() {
        let methods = vec![
            method("1", "bKash", "01712345678", true),
            method("2", "Nagad", "01812345678", true),
        ];

        assert_eq!(filter(&methods, "0181", StatusFilter::All).len(), 1);
        assert_eq!(filter(&methods, "send money", StatusFilter::All).len(), 2);
    }

    #[test]
    fn test_status_filter_combines_with_search() {
        let methods = vec![
            method("1", "bKash", "01712345678", true),
            method("2", "bKash Merchant", "01700000000", false),
            method("3", "Nagad", "01812345678", false),
        ];

        let active = filter(&methods, "bkash", StatusFilter::Active);
        assert_eq!(ids(&active), vec!["1"]);

        let inactive = filter(&methods, "", StatusFilter::Inactive);
        assert_eq!(ids(&inactive), vec!["2", "3"]);
    }

    #[test]
    fn test_seller_search_fields() {
        let sellers = vec![
            seller("a", "Karim", "KARIM42", true),
            seller("b", "Salma", "SALMA07", true),
        ];

        assert_eq!(filter(&sellers, "salma07", StatusFilter::All).len(), 1);
        assert_eq!(filter(&sellers, "karim@example", StatusFilter::All).len(), 1);
        assert_eq!(filter(&sellers, "0181234", StatusFilter::All).len(), 2);
        assert!(filter(&sellers, "nobody", StatusFilter::All).is_empty());
    }

    #[test]
    fn test_search_ignores_surrounding_whitespace() {
        let sellers = vec![seller("a", "Karim", "KARIM42", true)];
        assert_eq!(filter(&sellers, "  karim  ", StatusFilter::All).len(), 1);
    }
}
