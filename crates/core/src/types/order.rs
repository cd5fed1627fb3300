//! Customer orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{OrderId, PaymentMethodId};
use super::money::Taka;

/// Order payload sent to the backend.
///
/// `seller_code` is serialized as `null` when the customer arrived without a
/// referral link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub payment_method: PaymentMethodId,
    pub transaction_id: String,
    pub seller_code: Option<String>,
}

/// An order as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// Absent on older deployments, which then cannot link to a receipt.
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<OrderId>,
    pub order_number: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub payment_method: Option<OrderPaymentMethod>,
    #[serde(default)]
    pub transaction_id: String,
    #[serde(default)]
    pub seller_code: Option<String>,
    #[serde(default)]
    pub amount: Option<Taka>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payment method reference on an order: a bare ID or a populated summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderPaymentMethod {
    Summary {
        #[serde(rename = "_id", alias = "id")]
        id: PaymentMethodId,
        name: String,
        #[serde(default)]
        number: String,
    },
    Id(PaymentMethodId),
}

impl OrderPaymentMethod {
    /// Display name when populated.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Summary { name, .. } => Some(name),
            Self::Id(_) => None,
        }
    }
}

/// Order review status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Bengali label shown on the receipt.
    #[must_use]
    pub const fn label_bn(self) -> &'static str {
        match self {
            Self::Pending | Self::Unknown => "যাচাই চলছে",
            Self::Confirmed => "নিশ্চিত",
            Self::Cancelled => "বাতিল",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_serializes_null_seller_code() {
        let order = NewOrder {
            customer_name: "Rahim".to_owned(),
            customer_email: "rahim@example.com".to_owned(),
            customer_phone: "01712345678".to_owned(),
            payment_method: PaymentMethodId::new("66b1"),
            transaction_id: "TX12345".to_owned(),
            seller_code: None,
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["customerName"], "Rahim");
        assert_eq!(json["paymentMethod"], "66b1");
        assert!(json["sellerCode"].is_null());
    }

    #[test]
    fn test_order_record_with_populated_payment_method() {
        let json = r#"{
            "_id": "o1",
            "orderNumber": "ORD-1001",
            "customerName": "Rahim",
            "paymentMethod": { "_id": "66b1", "name": "bKash", "number": "01712345678" },
            "transactionId": "TX12345",
            "amount": 3000,
            "status": "confirmed"
        }"#;

        let order: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(order.id.unwrap().as_str(), "o1");
        assert_eq!(order.order_number, "ORD-1001");
        assert_eq!(order.payment_method.unwrap().name(), Some("bKash"));
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.amount, Some(Taka::from_whole(3000)));
    }

    #[test]
    fn test_order_record_unknown_status() {
        let json = r#"{"orderNumber":"ORD-2","paymentMethod":"66b1","status":"refunded"}"#;
        let order: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Unknown);
        assert!(order.id.is_none());
        assert_eq!(order.payment_method.unwrap().name(), None);
    }
}
