//! Payment method management.
//!
//! ```text
//! GET  /payment-methods               - List with search and status filter
//! POST /payment-methods               - Create (multipart, logo required)
//! GET  /payment-methods/new           - List with the add dialog open
//! GET  /payment-methods/{id}          - List with the details dialog open
//! POST /payment-methods/{id}          - Update (multipart, logo optional)
//! GET  /payment-methods/{id}/edit     - List with the edit dialog open
//! GET  /payment-methods/{id}/delete   - List with the delete confirmation open
//! POST /payment-methods/{id}/delete   - Delete
//! POST /payment-methods/{id}/toggle   - Flip active status
//! ```
//!
//! The list is fetched from the backend on every render, so a successful
//! mutation redirects back to it instead of patching anything locally.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use course_shop_core::validation::validate_payment_method;
use course_shop_core::{
    Banner, FieldErrors, FormMode, ImageUpload, ModalKind, ModalState, OpenModal, PaymentMethod,
    PaymentMethodForm, PaymentMethodId, filter,
};
use tower_sessions::Session;
use tracing::instrument;

use super::{AdminView, ListQuery, outcome, page_banner};
use crate::error::Result;
use crate::filters;
use crate::middleware::{CurrentAdmin, RequireAdminAuth, set_flash};
use crate::state::AppState;

/// Largest request body accepted by the upload routes.
///
/// Above the 5 MiB logo limit so oversized logos get a form error instead
/// of a rejected request.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const BASE_PATH: &str = "/payment-methods";

const FETCH_FAILED: &str = "Failed to fetch payment methods";
const NOT_FOUND: &str = "Payment method not found";
const ADDED: &str = "Payment method added successfully!";
const ADD_FAILED: &str = "Failed to add payment method";
const UPDATED: &str = "Payment method updated successfully!";
const UPDATE_FAILED: &str = "Failed to update payment method";
const DELETED: &str = "Payment method deleted successfully!";
const DELETE_FAILED: &str = "Failed to delete payment method";
const TOGGLE_FAILED: &str = "Failed to toggle status";

/// Build the payment method router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(BASE_PATH, get(index).post(create))
        .route("/payment-methods/new", get(new))
        .route("/payment-methods/{id}", get(show).post(update))
        .route("/payment-methods/{id}/edit", get(edit))
        .route(
            "/payment-methods/{id}/delete",
            get(confirm_delete).post(delete),
        )
        .route("/payment-methods/{id}/toggle", post(toggle))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// Payment method list page, optionally with one dialog open.
#[derive(Template, WebTemplate)]
#[template(path = "payment_methods/index.html")]
pub struct PaymentMethodsTemplate {
    pub admin: AdminView,
    pub current_path: &'static str,
    pub banner: Option<Banner>,
    pub query: ListQuery,
    /// Size of the unfiltered list.
    pub total: usize,
    pub rows: Vec<PaymentMethod>,
    pub modal: ModalState<PaymentMethodForm>,
    /// Record the open dialog refers to.
    pub target: Option<PaymentMethod>,
}

impl PaymentMethodsTemplate {
    pub const fn dialog(&self) -> Option<&OpenModal<PaymentMethodForm>> {
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
            Some(ModalKind::Add) => "Add Payment Method",
            Some(ModalKind::Edit) => "Edit Payment Method",
            Some(ModalKind::Delete) => "Delete Payment Method",
            Some(ModalKind::View) | None => "Payment Method Details",
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

    /// List URL keeping the current filter.
    pub fn list_url(&self) -> String {
        format!("{BASE_PATH}{}", self.query.query_string())
    }

    pub const fn empty_title(&self) -> &'static str {
        if self.total == 0 {
            "No Payment Methods"
        } else {
            "No matching payment methods found"
        }
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.dialog().and_then(|open| open.form.error(field))
    }
}

/// Everything fetched for one render.
struct Listing {
    methods: Vec<PaymentMethod>,
    /// Set when the fetch failed; the page renders empty with this banner.
    error: Option<Banner>,
}

impl Listing {
    async fn fetch(state: &AppState, admin: &CurrentAdmin) -> Result<Self> {
        match state.backend().all_payment_methods(&admin.token).await {
            Ok(methods) => Ok(Self {
                methods,
                error: None,
            }),
            Err(e) if e.is_unauthorized() => Err(e.into()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch payment methods");
                Ok(Self {
                    methods: Vec::new(),
                    error: Some(Banner::Error(super::failure_message(&e, FETCH_FAILED))),
                })
            }
        }
    }

    fn find(&self, id: &str) -> Option<&PaymentMethod> {
        self.methods.iter().find(|method| method.id.as_str() == id)
    }

    async fn render(
        self,
        session: &Session,
        admin: &CurrentAdmin,
        query: ListQuery,
        modal: ModalState<PaymentMethodForm>,
        banner: Option<Banner>,
    ) -> Result<PaymentMethodsTemplate> {
        let target = modal
            .modal()
            .and_then(|open| open.target.as_deref())
            .and_then(|id| self.find(id))
            .cloned();
        let rows = filter(&self.methods, &query.search, query.status_filter())
            .into_iter()
            .cloned()
            .collect();

        Ok(PaymentMethodsTemplate {
            admin: AdminView::from(&admin.profile),
            current_path: BASE_PATH,
            banner: page_banner(session, banner.or(self.error)).await?,
            query,
            total: self.methods.len(),
            rows,
            modal,
            target,
        })
    }
}

fn list_url(query: &ListQuery) -> String {
    format!("{BASE_PATH}{}", query.query_string())
}

/// Flash `banner` and go back to the list.
async fn back_to_list(session: &Session, query: &ListQuery, banner: Banner) -> Result<Response> {
    set_flash(session, &banner).await?;
    Ok(Redirect::to(&list_url(query)).into_response())
}

/// Render a dialog for an existing record, or go back to the list if it is
/// gone.
async fn open_for_record(
    state: &AppState,
    admin: &CurrentAdmin,
    session: &Session,
    query: ListQuery,
    id: &str,
    open: impl FnOnce(&PaymentMethod) -> ModalState<PaymentMethodForm>,
) -> Result<Response> {
    let listing = Listing::fetch(state, admin).await?;
    if listing.error.is_some() {
        let page = listing
            .render(session, admin, query, ModalState::Closed, None)
            .await?;
        return Ok(page.into_response());
    }

    let Some(method) = listing.find(id) else {
        return back_to_list(session, &query, Banner::Error(NOT_FOUND.to_string())).await;
    };
    let modal = open(method);
    let page = listing.render(session, admin, query, modal, None).await?;
    Ok(page.into_response())
}

/// After a submission: a closed dialog goes back to the re-fetched list,
/// an open one is rendered again with its values and banner.
async fn conclude(
    state: &AppState,
    admin: &CurrentAdmin,
    session: &Session,
    query: ListQuery,
    (modal, banner): (ModalState<PaymentMethodForm>, Option<Banner>),
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

/// Read the multipart payment method form.
///
/// An empty file input counts as no new logo.
async fn read_form(mut multipart: Multipart) -> Result<PaymentMethodForm> {
    let mut form = PaymentMethodForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if !file_name.is_empty() || !bytes.is_empty() {
                    form.image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            "name" => form.name = field.text().await?,
            "number" => form.number = field.text().await?,
            "instructions" => form.instructions = field.text().await?,
            "is_active" => form.is_active = field.text().await? == "true",
            _ => {}
        }
    }

    Ok(form)
}

/// New records start active.
fn blank_form() -> PaymentMethodForm {
    PaymentMethodForm {
        is_active: true,
        ..PaymentMethodForm::default()
    }
}

/// GET /payment-methods
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

/// GET /payment-methods/new
#[instrument(skip(admin, state, session))]
pub async fn new(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let page = Listing::fetch(&state, &admin)
        .await?
        .render(&session, &admin, query, ModalState::open_add(blank_form()), None)
        .await?;
    Ok(page.into_response())
}

/// GET /payment-methods/{id}
#[instrument(skip(admin, state, session))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    open_for_record(&state, &admin, &session, query, &id, |method| {
        ModalState::open_view(
            method.id.as_str(),
            PaymentMethodForm::from_payment_method(method),
        )
    })
    .await
}

/// GET /payment-methods/{id}/edit
#[instrument(skip(admin, state, session))]
pub async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    open_for_record(&state, &admin, &session, query, &id, |method| {
        ModalState::open_edit(
            method.id.as_str(),
            PaymentMethodForm::from_payment_method(method),
        )
    })
    .await
}

/// GET /payment-methods/{id}/delete
#[instrument(skip(admin, state, session))]
pub async fn confirm_delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    open_for_record(&state, &admin, &session, query, &id, |method| {
        ModalState::open_delete(
            method.id.as_str(),
            PaymentMethodForm::from_payment_method(method),
        )
    })
    .await
}

/// POST /payment-methods
#[instrument(skip_all)]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
    multipart: Multipart,
) -> Result<Response> {
    let form = read_form(multipart).await?;
    let modal = ModalState::open_add(form)
        .submit(|form| validate_payment_method(form, FormMode::Create));

    let ModalState::Submitting(open) = &modal else {
        return conclude(&state, &admin, &session, query, (modal, None)).await;
    };

    let result = state
        .backend()
        .create_payment_method(&admin.token, &open.form.values)
        .await;
    let outcome = outcome(result, |_| ADDED.to_string(), ADD_FAILED)?;
    conclude(&state, &admin, &session, query, modal.finish(outcome)).await
}

/// POST /payment-methods/{id}
#[instrument(skip(admin, state, session, multipart))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
    multipart: Multipart,
) -> Result<Response> {
    let form = read_form(multipart).await?;
    let modal = ModalState::open_edit(id.as_str(), form)
        .submit(|form| validate_payment_method(form, FormMode::Edit));

    let ModalState::Submitting(open) = &modal else {
        return conclude(&state, &admin, &session, query, (modal, None)).await;
    };

    let result = state
        .backend()
        .update_payment_method(&admin.token, &PaymentMethodId::new(id.as_str()), &open.form.values)
        .await;
    let outcome = outcome(result, |_| UPDATED.to_string(), UPDATE_FAILED)?;
    conclude(&state, &admin, &session, query, modal.finish(outcome)).await
}

/// POST /payment-methods/{id}/delete
#[instrument(skip(admin, state, session))]
pub async fn delete(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let modal = ModalState::open_delete(id.as_str(), PaymentMethodForm::default())
        .submit(|_| FieldErrors::new());

    let result = state
        .backend()
        .delete_payment_method(&admin.token, &PaymentMethodId::new(id.as_str()))
        .await;
    let outcome = outcome(result, |()| DELETED.to_string(), DELETE_FAILED)?;
    conclude(&state, &admin, &session, query, modal.finish(outcome)).await
}

/// POST /payment-methods/{id}/toggle
///
/// One PATCH, then back to the list, which is fetched again.
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
        .toggle_payment_method(&admin.token, &PaymentMethodId::new(id.as_str()))
        .await;
    let banner = match outcome(result, toggled_message, TOGGLE_FAILED)? {
        Ok(message) => Banner::Success(message),
        Err(message) => Banner::Error(message),
    };
    back_to_list(&session, &query, banner).await
}

fn toggled_message(method: PaymentMethod) -> String {
    let verb = if method.is_active {
        "activated"
    } else {
        "deactivated"
    };
    format!("Payment method {verb} successfully!")
}
