//! Sellers (referral affiliates) and their performance figures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::SellerId;
use super::money::Taka;

/// An affiliate whose referral link attributes orders to them.
///
/// `seller_code` and `seller_url` are generated by the backend and never
/// edited here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    #[serde(rename = "_id", alias = "id")]
    pub id: SellerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Percentage of each confirmed sale, 0-100.
    #[serde(default)]
    pub commission_rate: f64,
    #[serde(default)]
    pub seller_code: String,
    #[serde(default)]
    pub seller_url: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub total_sales: Taka,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Performance figures for one seller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SellerStats {
    pub total_orders: u64,
    pub confirmed_orders: u64,
    pub total_revenue: Taka,
    pub total_commission: Taka,
    /// Confirmed orders as a percentage of all orders.
    pub conversion_rate: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_seller() {
        let json = r#"{
            "_id": "77c2",
            "name": "Karim",
            "email": "karim@example.com",
            "phone": "01812345678",
            "commissionRate": 12.5,
            "sellerCode": "KARIM42",
            "sellerUrl": "https://shop.example.com/order?ref=KARIM42",
            "isActive": true,
            "totalSales": 9000
        }"#;

        let seller: Seller = serde_json::from_str(json).unwrap();
        assert_eq!(seller.seller_code, "KARIM42");
        assert!((seller.commission_rate - 12.5).abs() < f64::EPSILON);
        assert_eq!(seller.total_sales, Taka::from_whole(9000));
    }

    #[test]
    fn test_stats_default_missing_fields() {
        let stats: SellerStats = serde_json::from_str(r#"{"totalOrders":4}"#).unwrap();
        assert_eq!(stats.total_orders, 4);
        assert_eq!(stats.confirmed_orders, 0);
        assert_eq!(stats.total_revenue, Taka::ZERO);
    }
}
