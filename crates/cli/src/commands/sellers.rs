//! Seller commands.

use course_shop_core::{SellerId, StatusFilter, filter};

use super::{CommandError, Context, status_label};

/// Print sellers matching `search` and `status`.
///
/// # Errors
///
/// Returns error if not signed in or the backend request fails.
pub async fn list(ctx: &Context, search: &str, status: StatusFilter) -> Result<(), CommandError> {
    let token = ctx.token().await?;
    let sellers = match ctx.client.all_sellers(&token).await {
        Ok(sellers) => sellers,
        Err(e) => return Err(ctx.backend_failure(e).await),
    };

    let rows = filter(&sellers, search, status);
    for seller in &rows {
        tracing::info!(
            "{}  {:<24} {:<12} {:>6}%  {:>10}  {:<8}  {}",
            seller.id,
            seller.name,
            seller.seller_code,
            seller.commission_rate,
            seller.total_sales.to_string(),
            status_label(seller.is_active),
            seller.seller_url,
        );
    }
    tracing::info!("{} of {} sellers", rows.len(), sellers.len());
    Ok(())
}

/// Flip a seller's active status.
///
/// # Errors
///
/// Returns error if not signed in or the backend request fails.
pub async fn toggle(ctx: &Context, id: &str) -> Result<(), CommandError> {
    let token = ctx.token().await?;
    match ctx.client.toggle_seller(&token, &SellerId::new(id)).await {
        Ok(seller) => {
            tracing::info!("Seller {} is now {}", seller.name, status_label(seller.is_active));
            Ok(())
        }
        Err(e) => Err(ctx.backend_failure(e).await),
    }
}

/// Print order and commission figures for one seller.
///
/// # Errors
///
/// Returns error if not signed in or the backend request fails.
pub async fn stats(ctx: &Context, id: &str) -> Result<(), CommandError> {
    let token = ctx.token().await?;
    let stats = match ctx.client.seller_stats(&token, &SellerId::new(id)).await {
        Ok(stats) => stats,
        Err(e) => return Err(ctx.backend_failure(e).await),
    };

    tracing::info!("Total orders:     {}", stats.total_orders);
    tracing::info!("Confirmed orders: {}", stats.confirmed_orders);
    tracing::info!("Total revenue:    {}", stats.total_revenue);
    tracing::info!("Commission:       {}", stats.total_commission);
    tracing::info!("Conversion rate:  {}%", stats.conversion_rate);
    Ok(())
}
