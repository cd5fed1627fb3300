//! Raw form input, exactly as the user submitted it.
//!
//! Fields stay as strings so validation can report on the original text and
//! forms can be re-rendered unchanged when validation fails.

use serde::{Deserialize, Serialize};

use super::order::NewOrder;
use super::payment_method::PaymentMethod;
use super::seller::Seller;
use super::id::PaymentMethodId;

/// Whether a resource form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormMode {
    Create,
    Edit,
}

/// Public order form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Selected payment method ID.
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub transaction_id: String,
    /// Referral code carried from the `ref` query parameter.
    #[serde(default)]
    pub seller_code: Option<String>,
}

impl OrderForm {
    /// A blank form with the first available payment method pre-selected.
    #[must_use]
    pub fn blank(methods: &[PaymentMethod], seller_code: Option<String>) -> Self {
        Self {
            payment_method: methods
                .first()
                .map(|m| m.id.to_string())
                .unwrap_or_default(),
            seller_code,
            ..Self::default()
        }
    }

    /// Build the backend payload. Call only after validation passed.
    #[must_use]
    pub fn to_new_order(&self) -> NewOrder {
        NewOrder {
            customer_name: self.name.trim().to_owned(),
            customer_email: self.email.trim().to_owned(),
            customer_phone: self.phone.trim().to_owned(),
            payment_method: PaymentMethodId::new(self.payment_method.trim()),
            transaction_id: self.transaction_id.trim().to_owned(),
            seller_code: self.seller_code.clone().filter(|code| !code.is_empty()),
        }
    }
}

/// Admin seller form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Raw commission text; parsed during validation.
    #[serde(default)]
    pub commission_rate: String,
    /// Checkbox, absent when unchecked.
    #[serde(default)]
    pub is_active: bool,
}

impl Default for SellerForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            commission_rate: "10".to_owned(),
            is_active: true,
        }
    }
}

impl SellerForm {
    /// Pre-populate from an existing seller for editing.
    #[must_use]
    pub fn from_seller(seller: &Seller) -> Self {
        Self {
            name: seller.name.clone(),
            email: seller.email.clone(),
            phone: seller.phone.clone(),
            commission_rate: seller.commission_rate.to_string(),
            is_active: seller.is_active,
        }
    }

    /// Parsed commission rate, if the text is a number.
    #[must_use]
    pub fn commission_rate(&self) -> Option<f64> {
        self.commission_rate.trim().parse().ok()
    }
}

/// An uploaded image file.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Size of the file in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Admin payment-method form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentMethodForm {
    pub name: String,
    pub number: String,
    pub instructions: String,
    pub is_active: bool,
    /// New logo, if one was chosen.
    pub image: Option<ImageUpload>,
}

impl PaymentMethodForm {
    /// Pre-populate from an existing payment method for editing.
    #[must_use]
    pub fn from_payment_method(method: &PaymentMethod) -> Self {
        Self {
            name: method.name.clone(),
            number: method.number.clone(),
            instructions: method.instructions.clone(),
            is_active: method.is_active,
            image: None,
        }
    }
}

/// Admin login form.
#[derive(Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
