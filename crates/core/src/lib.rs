//! Course Shop Core - Shared types, validation and form state.
//!
//! This crate provides the pieces shared by every Course Shop component:
//! - `storefront` - Public course landing page and order form
//! - `admin` - Back-office for payment methods and sellers
//! - `cli` - Operator tooling against the same backend
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. The backend API owns every record; the types here mirror its
//! JSON shapes and the client-side rules applied before anything is sent.
//!
//! # Modules
//!
//! - [`types`] - Entities, IDs, money and status filters
//! - [`validation`] - Field validation for every form
//! - [`filter`] - Search and status filtering for list views
//! - [`modal`] - Add/edit/view/delete dialog state machine
//! - [`error_code`] - Structured backend error codes
//! - [`messages`] - Localized customer-facing toasts
//! - [`referral`] - Seller referral code helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error_code;
pub mod filter;
pub mod messages;
pub mod modal;
pub mod referral;
pub mod types;
pub mod validation;

pub use error_code::ApiErrorCode;
pub use filter::{Searchable, filter};
pub use modal::{Banner, FormState, ModalKind, ModalState, OpenModal};
pub use types::*;
pub use validation::FieldErrors;
