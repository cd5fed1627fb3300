//! HTTP middleware stack for admin.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with in-memory store)
//! 4. Security headers (stricter CSP for admin)
//! 5. Auth guard (the [`RequireAdminAuth`] extractor on protected routes)

pub mod auth;
pub mod security_headers;
pub mod session;

pub use auth::{AdminAuthRejection, CurrentAdmin, RequireAdminAuth};
pub use security_headers::security_headers_middleware;
pub use session::{TowerSessionStore, create_session_layer, set_flash, take_flash};
