//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /order                  - Order form (?ref=SELLER_CODE)
//! POST /order                  - Place an order (rate limited)
//! GET  /order-success/{id}     - Order receipt
//! ```

pub mod home;
pub mod order;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::order_rate_limiter;
use crate::state::AppState;

/// Create the order routes router.
///
/// Only the POST is rate limited; viewing the form is free.
pub fn order_routes() -> Router<AppState> {
    Router::new().route(
        "/order",
        get(order::show).merge(post(order::submit).route_layer(order_rate_limiter())),
    )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .merge(order_routes())
        .route("/order-success/{id}", get(order::success))
}
