//! Payment method commands.

use course_shop_core::{PaymentMethodId, StatusFilter, filter};

use super::{CommandError, Context, status_label};

/// Print payment methods matching `search` and `status`.
///
/// # Errors
///
/// Returns error if not signed in or the backend request fails.
pub async fn list(ctx: &Context, search: &str, status: StatusFilter) -> Result<(), CommandError> {
    let token = ctx.token().await?;
    let methods = match ctx.client.all_payment_methods(&token).await {
        Ok(methods) => methods,
        Err(e) => return Err(ctx.backend_failure(e).await),
    };

    let rows = filter(&methods, search, status);
    for method in &rows {
        tracing::info!(
            "{}  {:<16} {:<14} {}",
            method.id,
            method.name,
            method.number,
            status_label(method.is_active),
        );
    }
    tracing::info!("{} of {} payment methods", rows.len(), methods.len());
    Ok(())
}

/// Flip a payment method's active status.
///
/// # Errors
///
/// Returns error if not signed in or the backend request fails.
pub async fn toggle(ctx: &Context, id: &str) -> Result<(), CommandError> {
    let token = ctx.token().await?;
    match ctx.client.toggle_payment_method(&token, &PaymentMethodId::new(id)).await {
        Ok(method) => {
            tracing::info!(
                "Payment method {} is now {}",
                method.name,
                status_label(method.is_active)
            );
            Ok(())
        }
        Err(e) => Err(ctx.backend_failure(e).await),
    }
}
