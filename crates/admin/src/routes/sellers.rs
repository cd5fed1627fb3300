//! Seller management.
//!
//! ```text
//! GET  /sellers                - List with search and status filter
//! POST /sellers                - Create
//! GET  /sellers/new            - List with the add dialog open
//! GET  /sellers/{id}           - List with the details dialog and stats open
//! POST /sellers/{id}           - Update
//! GET  /sellers/{id}/edit      - List with the edit dialog open
//! GET  /sellers/{id}/delete    - List with the delete confirmation open
//! POST /sellers/{id}/delete    - Delete
//! POST /sellers/{id}/toggle    - Flip active status
//! ```

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use course_shop_backend::client::SellerInput;
use course_shop_core::validation::validate_seller;
use course_shop_core::{
    Banner, FieldErrors, FormMode, ModalKind, ModalState, OpenModal, Seller, SellerForm, SellerId,
    SellerStats, filter,
};
use tower_sessions::Session;
use tracing::instrument;

use super::{AdminView, ListQuery, failure_message, outcome, page_banner};
use crate::error::Result;
use crate::filters;
use crate::middleware::{CurrentAdmin, RequireAdminAuth, set_flash};
use crate::state::AppState;

const BASE_PATH: &str = "/sellers";

const FETCH_FAILED: &str = "Failed to fetch sellers";
const NOT_FOUND: &str = "Seller not found";
const ADDED: &str = "Seller added successfully!";
const ADD_FAILED: &str = "Failed to add seller";
const UPDATED: &str = "Seller updated successfully!";
const UPDATE_FAILED: &str = "Failed to update seller";
const DELETED: &str = "Seller deleted successfully!";
const DELETE_FAILED: &str = "Failed to delete seller";
const TOGGLE_FAILED: &str = "Failed to toggle status";

/// Build the seller router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(BASE_PATH, get(index).post(create))
        .route("/sellers/new", get(new))
        .route("/sellers/{id}", get(show).post(update))
        .route("/sellers/{id}/edit", get(edit))
        .route("/sellers/{id}/delete", get(confirm_delete).post(delete))
        .route("/sellers/{id}/toggle", post(toggle))
}

/// Seller list page, optionally with one dialog open.
#[derive(Template, WebTemplate)]
#[template(path = "sellers/index.html")]
pub struct SellersTemplate {
    pub admin: AdminView,
    pub current_path: &'static str,
    pub banner: Option<Banner>,
    pub query: ListQuery,
    /// Size of the unfiltered list.
    pub total: usize,
    pub rows: Vec<Seller>,
    pub modal: ModalState<SellerForm>,
    /// Record the open dialog refers to.
    pub target: Option<Seller>,
    /// Performance figures for the details dialog. Absent when they could
    /// not be loaded.
    pub stats: Option<SellerStats>,
}

impl SellersTemplate {
    pub const fn dialog(&self) -> Option<&OpenModal<SellerForm>> {
        self.modal.modal()
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.dialog().is_some_and(|open| {
            matches!(
                (open.kind, kind),
                (ModalKind::Add, "add")
                    | (ModalKind::Edit, "edit")
                    | (ModalKind::View, "view")
                    | (ModalKind::Delete, "delete")
            )
        })
    }

    pub fn dialog_title(&self) -> &'static str {
        match self.dialog().map(|open| open.kind) {
            Some(ModalKind::Add) => "Add New Seller",
            Some(ModalKind::Edit) => "Edit Seller",
            Some(ModalKind::Delete) => "Delete Seller",
            Some(ModalKind::View) | None => "Seller Details",
        }
    }

    /// Where the open form posts to.
    pub fn form_action(&self) -> String {
        let target = self.dialog().and_then(|open| open.target.as_deref());
        match (self.dialog().map(|open| open.kind), target) {
            (Some(ModalKind::Edit), Some(id)) => {
                format!("{BASE_PATH}/{id}{}", self.query.query_string())
            }
            (Some(ModalKind::Delete), Some(id)) => {
                format!("{BASE_PATH}/{id}/delete{}", self.query.query_string())
            }
            _ => self.list_url(),
        }
    }

    pub fn list_url(&self) -> String {
        list_url(&self.query)
    }

    pub const fn empty_title(&self) -> &'static str {
        if self.total == 0 {
            "No Sellers"
        } else {
            "No matching sellers found"
        }
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.dialog().and_then(|open| open.form.error(field))
    }
}

struct Listing {
    sellers: Vec<Seller>,
    error: Option<Banner>,
}

impl Listing {
    async fn fetch(state: &AppState, admin: &CurrentAdmin) -> Result<Self> {
        match state.backend().all_sellers(&admin.token).await {
            Ok(sellers) => Ok(Self {
                sellers,
                error: None,
            }),
            Err(e) if e.is_unauthorized() => Err(e.into()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch sellers");
                Ok(Self {
                    sellers: Vec::new(),
                    error: Some(Banner::Error(failure_message(&e, FETCH_FAILED))),
                })
            }
        }
    }

    fn find(&self, id: &str) -> Option<&Seller> {
        self.sellers.iter().find(|seller| seller.id.as_str() == id)
    }

    async fn render(
        self,
        session: &Session,
        admin: &CurrentAdmin,
        query: ListQuery,
        modal: ModalState<SellerForm>,
        banner: Option<Banner>,
    ) -> Result<SellersTemplate> {
        let target = modal
            .modal()
            .and_then(|open| open.target.as_deref())
            .and_then(|id| self.find(id))
            .cloned();
        let rows = filter(&self.sellers, &query.search, query.status_filter())
            .into_iter()
            .cloned()
            .collect();

        Ok(SellersTemplate {
            admin: AdminView::from(&admin.profile),
            current_path: BASE_PATH,
            banner: page_banner(session, banner.or(self.error)).await?,
            query,
            total: self.sellers.len(),
            rows,
            modal,
            target,
            stats: None,
        })
    }
}

fn list_url(query: &ListQuery) -> String {
    format!("{BASE_PATH}{}", query.query_string())
}

async fn back_to_list(session: &Session, query: &ListQuery, banner: Banner) -> Result<Response> {
    set_flash(session, &banner).await?;
    Ok(Redirect::to(&list_url(query)).into_response())
}

/// Load the list and the addressed seller, or go back to the list if the
/// seller is gone.
async fn load_with_target(
    state: &AppState,
    admin: &CurrentAdmin,
    session: &Session,
    query: &ListQuery,
    id: &str,
) -> Result<std::result::Result<(Listing, Seller), Response>> {
    let listing = Listing::fetch(state, admin).await?;
    if listing.error.is_some() {
        let page = listing
            .render(session, admin, query.clone(), ModalState::Closed, None)
            .await?;
        return Ok(Err(page.into_response()));
    }

    match listing.find(id).cloned() {
        Some(seller) => Ok(Ok((listing, seller))),
        None => Ok(Err(
            back_to_list(session, query, Banner::Error(NOT_FOUND.to_string())).await?,
        )),
    }
}

async fn conclude(
    state: &AppState,
    admin: &CurrentAdmin,
    session: &Session,
    query: ListQuery,
    (modal, banner): (ModalState<SellerForm>, Option<Banner>),
) -> Result<Response> {
    if modal.is_closed() {
        return match banner {
            Some(banner) => back_to_list(session, &query, banner).await,
            None => Ok(Redirect::to(&list_url(&query)).into_response()),
        };
    }

    let page = Listing::fetch(state, admin)
        .await?
        .render(session, admin, query, modal, banner)
        .await?;
    Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
}

/// GET /sellers
#[instrument(skip(admin, state, session))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let page = Listing::fetch(&state, &admin)
        .await?
        .render(&session, &admin, query, ModalState::Closed, None)
        .await?;
    Ok(page.into_response())
}

/// GET /sellers/new
#[instrument(skip(admin, state, session))]
pub async fn new(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let modal = ModalState::open_add(SellerForm::default());
    let page = Listing::fetch(&state, &admin)
        .await?
        .render(&session, &admin, query, modal, None)
        .await?;
    Ok(page.into_response())
}

/// GET /sellers/{id}
///
/// The stats panel is a second request; if it fails the dialog still opens
/// without it.
#[instrument(skip(admin, state, session))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let (listing, seller) = match load_with_target(&state, &admin, &session, &query, &id).await? {
        Ok(loaded) => loaded,
        Err(response) => return Ok(response),
    };

    let stats = match state.backend().seller_stats(&admin.token, &seller.id).await {
        Ok(stats) => Some(stats),
        Err(e) => {
            tracing::warn!(error = %e, seller_id = %seller.id, "Failed to fetch seller stats");
            None
        }
    };

    let modal = ModalState::open_view(seller.id.as_str(), SellerForm::from_seller(&seller));
    let mut page = listing.render(&session, &admin, query, modal, None).await?;
    page.stats = stats;
    Ok(page.into_response())
}

/// GET /sellers/{id}/edit
#[instrument(skip(admin, state, session))]
pub async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let (listing, seller) = match load_with_target(&state, &admin, &session, &query, &id).await? {
        Ok(loaded) => loaded,
        Err(response) => return Ok(response),
    };

    let modal = ModalState::open_edit(seller.id.as_str(), SellerForm::from_seller(&seller));
    let page = listing.render(&session, &admin, query, modal, None).await?;
    Ok(page.into_response())
}

/// GET /sellers/{id}/delete
#[instrument(skip(admin, state, session))]
pub async fn confirm_delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let (listing, seller) = match load_with_target(&state, &admin, &session, &query, &id).await? {
        Ok(loaded) => loaded,
        Err(response) => return Ok(response),
    };

    let modal = ModalState::open_delete(seller.id.as_str(), SellerForm::from_seller(&seller));
    let page = listing.render(&session, &admin, query, modal, None).await?;
    Ok(page.into_response())
}

/// POST /sellers
#[instrument(skip(admin, state, session, form))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
    Form(form): Form<SellerForm>,
) -> Result<Response> {
    let modal = ModalState::open_add(form).submit(validate_seller);

    let ModalState::Submitting(open) = &modal else {
        return conclude(&state, &admin, &session, query, (modal, None)).await;
    };

    let input = SellerInput::from_form(&open.form.values, FormMode::Create);
    let result = state.backend().create_seller(&admin.token, &input).await;
    let outcome = outcome(result, |_| ADDED.to_string(), ADD_FAILED)?;
    conclude(&state, &admin, &session, query, modal.finish(outcome)).await
}

/// POST /sellers/{id}
#[instrument(skip(admin, state, session, form))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
    Form(form): Form<SellerForm>,
) -> Result<Response> {
    let modal = ModalState::open_edit(id.as_str(), form).submit(validate_seller);

    let ModalState::Submitting(open) = &modal else {
        return conclude(&state, &admin, &session, query, (modal, None)).await;
    };

    let input = SellerInput::from_form(&open.form.values, FormMode::Edit);
    let result = state
        .backend()
        .update_seller(&admin.token, &SellerId::new(id.as_str()), &input)
        .await;
    let outcome = outcome(result, |_| UPDATED.to_string(), UPDATE_FAILED)?;
    conclude(&state, &admin, &session, query, modal.finish(outcome)).await
}

/// POST /sellers/{id}/delete
#[instrument(skip(admin, state, session))]
pub async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let modal =
        ModalState::open_delete(id.as_str(), SellerForm::default()).submit(|_| FieldErrors::new());

    let result = state
        .backend()
        .delete_seller(&admin.token, &SellerId::new(id.as_str()))
        .await;
    let outcome = outcome(result, |()| DELETED.to_string(), DELETE_FAILED)?;
    conclude(&state, &admin, &session, query, modal.finish(outcome)).await
}

/// POST /sellers/{id}/toggle
#[instrument(skip(admin, state, session))]
pub async fn toggle(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let result = state
        .backend()
        .toggle_seller(&admin.token, &SellerId::new(id.as_str()))
        .await;
    let banner = match outcome(result, toggled_message, TOGGLE_FAILED)? {
        Ok(message) => Banner::Success(message),
        Err(message) => Banner::Error(message),
    };
    back_to_list(&session, &query, banner).await
}

fn toggled_message(seller: Seller) -> String {
    let verb = if seller.is_active {
        "activated"
    } else {
        "deactivated"
    };
    format!("Seller {verb} successfully!")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use course_shop_core::{AdminProfile, Taka};

    fn seller(id: &str, name: &str, active: bool) -> Seller {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "name": name,
            "email": "karim@example.com",
            "phone": "01812345678",
            "commissionRate": 12.5,
            "sellerCode": "KARIM01",
            "sellerUrl": "https://shop.example.com/order?ref=KARIM01",
            "isActive": active,
            "totalSales": 9000,
        }))
        .unwrap()
    }

    fn template(rows: Vec<Seller>, modal: ModalState<SellerForm>) -> SellersTemplate {
        let target = modal
            .modal()
            .and_then(|open| open.target.clone())
            .and_then(|id| rows.iter().find(|s| s.id.as_str() == id).cloned());

        SellersTemplate {
            admin: AdminView::from(&AdminProfile {
                id: None,
                name: "Rahim".to_string(),
                email: "rahim@example.com".to_string(),
            }),
            current_path: BASE_PATH,
            banner: None,
            query: ListQuery::default(),
            total: rows.len(),
            rows,
            modal,
            target,
            stats: None,
        }
    }

    #[test]
    fn test_list_renders_referral_link_and_commission() {
        let html = template(vec![seller("s1", "Karim", true)], ModalState::Closed)
            .render()
            .unwrap();

        assert!(html.contains("KARIM01"));
        assert!(html.contains("12.5%"));
        assert!(html.contains("data-copy=\"https://shop.example.com/order?ref=KARIM01\""));
        assert!(html.contains("action=\"/sellers/s1/toggle\""));
    }

    #[test]
    fn test_view_without_stats_hides_panel() {
        let rows = vec![seller("s1", "Karim", true)];
        let form = SellerForm::from_seller(rows.first().unwrap());
        let html = template(rows, ModalState::open_view("s1", form))
            .render()
            .unwrap();

        assert!(html.contains("Seller Details"));
        assert!(!html.contains("Performance Stats"));
    }

    #[test]
    fn test_view_with_stats_shows_panel() {
        let rows = vec![seller("s1", "Karim", true)];
        let form = SellerForm::from_seller(rows.first().unwrap());
        let mut page = template(rows, ModalState::open_view("s1", form));
        page.stats = Some(SellerStats {
            total_orders: 8,
            confirmed_orders: 6,
            total_revenue: Taka::from_whole(18000),
            total_commission: Taka::from_whole(2250),
            conversion_rate: 75.0,
        });
        let html = page.render().unwrap();

        assert!(html.contains("Performance Stats"));
        assert!(html.contains("৳18,000"));
        assert!(html.contains("75%"));
    }

    #[test]
    fn test_edit_errors_keep_values() {
        let form = SellerForm {
            name: "Karim".to_string(),
            email: "karim@example.com".to_string(),
            phone: "0123".to_string(),
            commission_rate: "150".to_string(),
            is_active: true,
        };
        let modal = ModalState::open_edit("s1", form).submit(validate_seller);
        let html = template(Vec::new(), modal).render().unwrap();

        assert!(html.contains("value=\"Karim\""));
        assert!(html.contains("Please enter a valid Bangladeshi phone number"));
        assert!(html.contains("Commission rate must be between 0 and 100"));
        assert!(html.contains("action=\"/sellers/s1\""));
    }

    #[test]
    fn test_empty_title() {
        assert_eq!(template(Vec::new(), ModalState::Closed).empty_title(), "No Sellers");
    }
}
