//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, extract::State, routing::get};
use course_shop_backend::BackendError;
use course_shop_core::{Searchable, Seller};
use tracing::instrument;

use super::AdminView;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Sellers listed in the leaderboard.
const TOP_SELLERS: usize = 5;

/// Total and active record counts for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub total: usize,
    pub active: usize,
}

impl Counts {
    fn of<T: Searchable>(items: &[T]) -> Self {
        Self {
            total: items.len(),
            active: items.iter().filter(|item| item.is_active()).count(),
        }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin: AdminView,
    pub current_path: &'static str,
    /// `None` when the list could not be loaded.
    pub payment_methods: Option<Counts>,
    pub sellers: Option<Counts>,
    /// Highest total sales first.
    pub top_sellers: Vec<Seller>,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// A failed count is shown as unavailable rather than failing the page.
fn counted<T: Searchable>(
    result: std::result::Result<Vec<T>, BackendError>,
    what: &str,
) -> Result<Option<Vec<T>>> {
    match result {
        Ok(items) => Ok(Some(items)),
        Err(e) if e.is_unauthorized() => Err(AppError::Backend(e)),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load {what} for dashboard");
            Ok(None)
        }
    }
}

/// Dashboard page handler.
///
/// GET /
#[instrument(skip_all)]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<DashboardTemplate> {
    let (methods, sellers) = tokio::join!(
        state.backend().all_payment_methods(&admin.token),
        state.backend().all_sellers(&admin.token),
    );
    let methods = counted(methods, "payment methods")?;
    let sellers = counted(sellers, "sellers")?;

    let top_sellers = sellers.as_deref().map(top_by_sales).unwrap_or_default();

    Ok(DashboardTemplate {
        admin: AdminView::from(&admin.profile),
        current_path: "/",
        payment_methods: methods.as_deref().map(Counts::of),
        sellers: sellers.as_deref().map(Counts::of),
        top_sellers,
    })
}

fn top_by_sales(sellers: &[Seller]) -> Vec<Seller> {
    let mut ranked = sellers.to_vec();
    ranked.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));
    ranked.truncate(TOP_SELLERS);
    ranked
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn seller(id: &str, sales: i64, active: bool) -> Seller {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "name": format!("Seller {id}"),
            "email": "s@example.com",
            "phone": "01712345678",
            "isActive": active,
            "totalSales": sales,
        }))
        .unwrap()
    }

    #[test]
    fn test_counts() {
        let sellers = vec![seller("a", 0, true), seller("b", 0, false), seller("c", 0, true)];
        assert_eq!(Counts::of(&sellers), Counts { total: 3, active: 2 });
    }

    #[test]
    fn test_top_by_sales_orders_and_truncates() {
        let sellers: Vec<Seller> = (0..7)
            .map(|i| seller(&i.to_string(), i * 1000, true))
            .collect();
        let top = top_by_sales(&sellers);

        assert_eq!(top.len(), TOP_SELLERS);
        assert_eq!(top.first().unwrap().id.as_str(), "6");
        assert_eq!(top.last().unwrap().id.as_str(), "2");
    }

    #[test]
    fn test_unavailable_counts_render() {
        let html = DashboardTemplate {
            admin: AdminView {
                name: "Rahim".to_string(),
                email: "rahim@example.com".to_string(),
                initial: "R".to_string(),
            },
            current_path: "/",
            payment_methods: None,
            sellers: Some(Counts { total: 0, active: 0 }),
            top_sellers: Vec::new(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Unavailable"));
        assert!(html.contains("Rahim"));
    }
}
