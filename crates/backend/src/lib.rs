//! Course Shop Backend - typed client for the REST backend.
//!
//! The backend owns every record, the admin credentials and all business
//! rules. This crate is the only place that speaks HTTP to it.
//!
//! # Modules
//!
//! - [`client`] - [`BackendClient`] and one `impl` block per resource
//! - [`envelope`] - The `{success, message, code, ...}` response wrapper
//! - [`session`] - [`SessionStore`] abstraction for the admin token
//! - [`guard`] - Token verification shared by every admin surface
//! - [`config`] - Environment helpers shared by the binaries
//!
//! # Cancellation
//!
//! Every operation is a plain future. Dropping it (for instance when axum
//! drops a handler because the browser went away) aborts the in-flight
//! request and nothing is written afterwards. Each request is bounded by
//! the configured timeout; nothing is retried.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod guard;
pub mod session;

pub use client::BackendClient;
pub use config::{BackendConfig, ConfigError, SentryConfig};
pub use error::BackendError;
pub use guard::{GuardOutcome, verify_admin};
pub use session::{AdminSession, MemorySessionStore, SessionStore, SessionStoreError};
