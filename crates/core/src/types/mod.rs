//! Domain types for Course Shop.
//!
//! Entities mirror the backend's JSON documents. Form types hold raw user
//! input exactly as submitted so validation can report on it.

pub mod admin;
pub mod forms;
pub mod id;
pub mod money;
pub mod order;
pub mod payment_method;
pub mod seller;
pub mod status;

pub use admin::AdminProfile;
pub use forms::{FormMode, ImageUpload, LoginForm, OrderForm, PaymentMethodForm, SellerForm};
pub use id::*;
pub use money::Taka;
pub use order::{NewOrder, OrderPaymentMethod, OrderRecord, OrderStatus};
pub use payment_method::{CreatedBy, PaymentMethod, PaymentMethodImage};
pub use seller::{Seller, SellerStats};
pub use status::StatusFilter;
