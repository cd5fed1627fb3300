//! Order endpoints.

use course_shop_core::{NewOrder, OrderId, OrderRecord};
use reqwest::Method;
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use super::BackendClient;
use crate::error::BackendError;

/// Header the backend uses to collapse repeated submissions.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

#[derive(Deserialize)]
struct OrderPayload {
    order: OrderRecord,
}

impl BackendClient {
    /// Place an order.
    ///
    /// `idempotency_key` is generated once per rendered form, so a double
    /// click sends the same key twice.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Api` with `DuplicateTransaction` or
    /// `InactivePaymentMethod` for the two expected rejections.
    #[instrument(skip(self, order), fields(transaction_id = %order.transaction_id))]
    pub async fn create_order(
        &self,
        order: &NewOrder,
        idempotency_key: Uuid,
    ) -> Result<OrderRecord, BackendError> {
        let request = self
            .request(Method::POST, &["orders", "create"], None)?
            .header(IDEMPOTENCY_KEY_HEADER, idempotency_key.to_string())
            .json(order);
        let payload: OrderPayload = self.execute(request).await?;
        Ok(payload.order)
    }

    /// Fetch an order for the receipt page.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Api` with `NotFound` for unknown IDs.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn order(&self, id: &OrderId) -> Result<OrderRecord, BackendError> {
        let request = self.request(Method::GET, &["orders", id.as_str()], None)?;
        let payload: OrderPayload = self.execute(request).await?;
        Ok(payload.order)
    }
}
