//! Order form and receipt route handlers.
//!
//! ```text
//! GET  /order?ref=CODE       - Order form, referral code carried in a hidden field
//! POST /order                - Validate and place the order
//! GET  /order-success/{id}   - Receipt, fetched from the backend by order ID
//! ```

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use course_shop_core::messages::{self, Toast};
use course_shop_core::validation::{FieldErrors, validate_order};
use course_shop_core::{
    ApiErrorCode, OrderForm, OrderId, OrderRecord, PaymentMethod, referral,
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::state::AppState;

/// Query parameters accepted by the order page.
#[derive(Debug, Default, Deserialize)]
pub struct OrderQuery {
    #[serde(rename = "ref")]
    pub referral: Option<String>,
}

/// Order form body: the customer's input plus the per-render submission ID.
#[derive(Debug, Deserialize)]
pub struct OrderSubmission {
    #[serde(flatten)]
    pub form: OrderForm,
    /// Sent to the backend as the idempotency key.
    #[serde(default)]
    pub submission_id: String,
}

/// Order page template.
#[derive(Template, WebTemplate)]
#[template(path = "order.html")]
pub struct OrderTemplate {
    pub price: String,
    pub methods: Arc<Vec<PaymentMethod>>,
    pub form: OrderForm,
    pub errors: FieldErrors,
    pub submission_id: String,
    /// Blocking error shown instead of the form.
    pub load_error: Option<&'static str>,
    pub toast: Option<Toast>,
    /// Set after a successful order.
    pub receipt_url: Option<String>,
}

impl OrderTemplate {
    /// The payment method that starts out checked.
    #[must_use]
    pub fn selected_method(&self) -> Option<&PaymentMethod> {
        self.methods
            .iter()
            .find(|method| method.id.as_str() == self.form.payment_method)
            .or_else(|| self.methods.first())
    }

    #[must_use]
    pub fn is_checked(&self, method: &PaymentMethod) -> bool {
        self.selected_method()
            .is_some_and(|selected| selected.id == method.id)
    }
}

/// Receipt page template.
#[derive(Template, WebTemplate)]
#[template(path = "order_success.html")]
pub struct OrderSuccessTemplate {
    pub order: OrderRecord,
    /// Amount charged, falling back to the configured course price.
    pub amount: String,
}

impl OrderSuccessTemplate {
    /// Payment method name, when the backend populated it.
    #[must_use]
    pub fn payment_method_name(&self) -> &str {
        self.order
            .payment_method
            .as_ref()
            .and_then(|method| method.name())
            .unwrap_or("-")
    }
}

/// Payment methods to render, or the blocking message to show instead.
async fn load_methods(state: &AppState) -> (Arc<Vec<PaymentMethod>>, Option<&'static str>) {
    match state.active_payment_methods().await {
        Ok(methods) if methods.is_empty() => {
            tracing::warn!("No active payment methods");
            (methods, Some(messages::NO_ACTIVE_PAYMENT_METHODS))
        }
        Ok(methods) => (methods, None),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load payment methods");
            (Arc::default(), Some(messages::PAYMENT_METHODS_LOAD_FAILED))
        }
    }
}

/// Display the order form.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Query(query): Query<OrderQuery>) -> Response {
    let (methods, load_error) = load_methods(&state).await;
    let form = OrderForm::blank(&methods, referral::referral_code(query.referral.as_deref()));

    OrderTemplate {
        price: state.config().course_price.display_bn(),
        methods,
        form,
        errors: FieldErrors::new(),
        submission_id: Uuid::new_v4().to_string(),
        load_error,
        toast: None,
        receipt_url: None,
    }
    .into_response()
}

/// Validate and place an order.
///
/// Invalid input re-renders the form with field errors and never reaches the
/// backend. Rejections choose their toast by error code.
#[instrument(
    skip(state, submission),
    fields(transaction_id = %submission.form.transaction_id.trim())
)]
pub async fn submit(
    State(state): State<AppState>,
    Form(submission): Form<OrderSubmission>,
) -> Response {
    let OrderSubmission {
        form,
        submission_id,
    } = submission;
    let (methods, load_error) = load_methods(&state).await;

    let mut page = OrderTemplate {
        price: state.config().course_price.display_bn(),
        methods,
        form,
        errors: FieldErrors::new(),
        submission_id,
        load_error,
        toast: None,
        receipt_url: None,
    };
    if page.load_error.is_some() {
        return (StatusCode::SERVICE_UNAVAILABLE, page).into_response();
    }

    page.errors = validate_order(&page.form);
    if !page.errors.is_empty() {
        page.toast = Some(messages::invalid_form());
        return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
    }

    let idempotency_key = Uuid::parse_str(&page.submission_id).unwrap_or_else(|_| Uuid::new_v4());
    let order = page.form.to_new_order();

    match state.backend().create_order(&order, idempotency_key).await {
        Ok(created) => {
            tracing::info!(order_number = %created.order_number, "Order placed");
            add_breadcrumb(
                "order",
                "Order placed",
                &[("order_number", created.order_number.as_str())],
            );

            page.form = OrderForm::blank(&page.methods, page.form.seller_code.take());
            page.submission_id = Uuid::new_v4().to_string();
            page.toast = Some(messages::order_placed(&created.order_number));
            page.receipt_url = created
                .id
                .as_ref()
                .map(|id| format!("/order-success/{id}"));
            page.into_response()
        }
        Err(e) if e.is_transport() => {
            // The request may have reached the backend; keep the key so a
            // retry is deduplicated.
            tracing::warn!(error = %e, "Order request failed in transport");
            page.toast = Some(messages::network_error());
            (StatusCode::BAD_GATEWAY, page).into_response()
        }
        Err(e) => {
            let code = e.code().unwrap_or(ApiErrorCode::Other);
            tracing::warn!(error = %e, code = %code, "Order rejected");

            if code == ApiErrorCode::InactivePaymentMethod {
                state.invalidate_payment_methods().await;
                let (methods, load_error) = load_methods(&state).await;
                page.methods = methods;
                page.load_error = load_error;
            }

            page.toast = Some(messages::order_rejected(
                code,
                e.api_message().unwrap_or_default(),
            ));
            page.submission_id = Uuid::new_v4().to_string();
            (StatusCode::UNPROCESSABLE_ENTITY, page).into_response()
        }
    }
}

/// Display the receipt for an order.
///
/// Unknown orders redirect to the home page.
#[instrument(skip(state), fields(order_id = %id))]
pub async fn success(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    match state.backend().order(&OrderId::new(id)).await {
        Ok(order) => {
            let amount = order
                .amount
                .unwrap_or(state.config().course_price)
                .display_bn();
            Ok(OrderSuccessTemplate { order, amount }.into_response())
        }
        Err(e) if e.is_not_found() => Ok(Redirect::to("/").into_response()),
        Err(e) => Err(e.into()),
    }
}
