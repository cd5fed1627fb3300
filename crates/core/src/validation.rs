//! Field validation for every form.
//!
//! Each `validate_*` function is pure: it maps a form to a [`FieldErrors`]
//! map and never touches the network. A form is valid when the returned map
//! is empty, so callers must check [`FieldErrors::is_empty`] rather than
//! looking for a particular key.
//!
//! Customer-facing order messages are Bengali; admin messages are English.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::types::{FormMode, ImageUpload, LoginForm, OrderForm, PaymentMethodForm, SellerForm};

/// Bangladeshi mobile number: `01`, an operator digit 3-9, then 8 digits.
static BD_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^01[3-9][0-9]{8}$").expect("Invalid regex"));

/// Loose email shape: a non-blank run, `@`, a non-blank run, a dot and a
/// final non-blank run, anywhere in the value.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("Invalid regex"));

/// Largest accepted logo upload.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Minimum transaction ID length after trimming.
pub const MIN_TRANSACTION_ID_CHARS: usize = 5;

/// Minimum admin password length.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Minimum customer name length after trimming.
pub const MIN_NAME_CHARS: usize = 2;

/// Field name to error message, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// An empty error map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns `true` when no field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with an error.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Record an error for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Error message for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Returns `true` if `field` has an error.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Iterate over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Returns `true` if `phone` is a Bangladeshi mobile number.
#[must_use]
pub fn is_bd_phone(phone: &str) -> bool {
    BD_PHONE.is_match(phone)
}

/// Returns `true` if `email` has the loose `name@domain.tld` shape.
#[must_use]
pub fn is_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate the public order form.
#[must_use]
pub fn validate_order(form: &OrderForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(&form.name) {
        errors.insert("name", "নাম অবশ্যই দিতে হবে");
    } else if form.name.trim().chars().count() < MIN_NAME_CHARS {
        errors.insert("name", "নাম কমপক্ষে ২ অক্ষর হতে হবে");
    }

    if is_blank(&form.email) {
        errors.insert("email", "ইমেইল অবশ্যই দিতে হবে");
    } else if !is_email(&form.email) {
        errors.insert("email", "সঠিক ইমেইল দিন");
    }

    if is_blank(&form.phone) {
        errors.insert("phone", "ফোন নম্বর অবশ্যই দিতে হবে");
    } else if !is_bd_phone(&form.phone) {
        errors.insert(
            "phone",
            "সঠিক বাংলাদেশী ফোন নম্বর দিন (যেমন: 01712345678)",
        );
    }

    if is_blank(&form.transaction_id) {
        errors.insert("transaction_id", "Transaction ID অবশ্যই দিতে হবে");
    } else if form.transaction_id.trim().chars().count() < MIN_TRANSACTION_ID_CHARS {
        errors.insert("transaction_id", "Transaction ID কমপক্ষে ৫ অক্ষর হতে হবে");
    }

    if is_blank(&form.payment_method) {
        errors.insert("payment_method", "পেমেন্ট পদ্ধতি নির্বাচন করুন");
    }

    errors
}

/// Validate the admin seller form.
///
/// The commission rate must parse as a number inside `0..=100`; missing,
/// unparseable and out-of-range values share one message.
#[must_use]
pub fn validate_seller(form: &SellerForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(&form.name) {
        errors.insert("name", "Seller name is required");
    }

    if is_blank(&form.email) {
        errors.insert("email", "Email is required");
    } else if !is_email(&form.email) {
        errors.insert("email", "Please enter a valid email");
    }

    if is_blank(&form.phone) {
        errors.insert("phone", "Phone number is required");
    } else if !is_bd_phone(&form.phone) {
        errors.insert("phone", "Please enter a valid Bangladeshi phone number");
    }

    let in_range = form
        .commission_rate()
        .is_some_and(|rate| (0.0..=100.0).contains(&rate));
    if !in_range {
        errors.insert("commission_rate", "Commission rate must be between 0 and 100");
    }

    errors
}

/// Validate the admin payment-method form.
///
/// A logo is required when creating and optional when editing. When one is
/// supplied its type is checked before its size, so a non-image file always
/// reports the type error.
#[must_use]
pub fn validate_payment_method(form: &PaymentMethodForm, mode: FormMode) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(&form.name) {
        errors.insert("name", "Payment method name is required");
    }

    if is_blank(&form.number) {
        errors.insert("number", "Payment method number is required");
    }

    if is_blank(&form.instructions) {
        errors.insert("instructions", "Instructions are required");
    }

    match &form.image {
        Some(image) => {
            if let Some(message) = image_error(image) {
                errors.insert("image", message);
            }
        }
        None if mode == FormMode::Create => errors.insert("image", "Image is required"),
        None => {}
    }

    errors
}

/// Type and size check for an uploaded logo.
#[must_use]
pub fn image_error(image: &ImageUpload) -> Option<&'static str> {
    if !is_image_type(&image.content_type) {
        Some("Please select a valid image file")
    } else if image.size() > MAX_IMAGE_BYTES {
        Some("Image size should be less than 5MB")
    } else {
        None
    }
}

/// `image/<subtype>`, optionally followed by `;` parameters, with a subtype
/// made of MIME token characters.
fn is_image_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    let Some(subtype) = essence.strip_prefix("image/") else {
        return false;
    };
    !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!#$&-^_.+".contains(c))
}

/// Validate the admin login form.
#[must_use]
pub fn validate_login(form: &LoginForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(&form.email) {
        errors.insert("email", "Email is required");
    } else if !is_email(&form.email) {
        errors.insert("email", "Please enter a valid email");
    }

    if form.password.is_empty() {
        errors.insert("password", "Password is required");
    } else if form.password.chars().count() < MIN_PASSWORD_CHARS {
        errors.insert("password", "Password must be at least 6 characters");
    }

    errors
}
