//! Integration tests for Course Shop.
//!
//! [`FakeBackend`] serves the REST API from memory on an ephemeral port.
//! [`spawn_storefront`] and [`spawn_admin`] start the real routers against
//! it, so tests drive them over HTTP the way a browser does.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p course-shop-integration-tests
//! ```
//!
//! Nothing external is needed; every server binds to `127.0.0.1:0`.

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    Json, Router,
    extract::{Multipart, Path, Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
};
use course_shop_admin::config::AdminConfig;
use course_shop_storefront::config::StorefrontConfig;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Credentials the fake backend accepts.
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "secret123";
pub const ADMIN_NAME: &str = "Rahim";

/// Amount the fake backend charges for every order.
const ORDER_AMOUNT: usize = 3000;

#[derive(Default)]
struct Store {
    payment_methods: Vec<Value>,
    sellers: Vec<Value>,
    orders: Vec<Value>,
    /// Orders already created, by idempotency key.
    replays: HashMap<String, Value>,
    tokens: HashSet<String>,
    /// `"METHOD /path"` for every request, in arrival order.
    log: Vec<String>,
    next_id: u64,
}

impl Store {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }
}

type Shared = Arc<Mutex<Store>>;

fn lock(store: &Shared) -> MutexGuard<'_, Store> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory stand-in for the REST backend.
#[derive(Clone)]
pub struct FakeBackend {
    store: Shared,
    url: String,
}

impl FakeBackend {
    /// Start the fake on an ephemeral port.
    pub async fn spawn() -> Self {
        let store = Shared::default();
        let addr = serve(router(store.clone())).await;
        Self {
            store,
            url: format!("http://{addr}/api"),
        }
    }

    /// API base URL, including the `/api` prefix.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Add a payment method and return its ID.
    pub fn seed_payment_method(&self, name: &str, number: &str, is_active: bool) -> String {
        let mut store = lock(&self.store);
        let id = store.next_id("pm");
        store.payment_methods.push(json!({
            "_id": id,
            "name": name,
            "number": number,
            "instructions": format!("Send Money করুন এই নম্বরে: {number}"),
            "image": { "url": format!("https://img.example.com/{id}.png") },
            "isActive": is_active,
        }));
        id
    }

    /// Add an active seller and return its ID.
    pub fn seed_seller(&self, name: &str, seller_code: &str) -> String {
        let mut store = lock(&self.store);
        let id = store.next_id("s");
        store.sellers.push(seller_document(&id, name, "01812345678", 10.0, seller_code));
        id
    }

    /// Issue a token without going through login.
    pub fn issue_token(&self) -> String {
        let mut store = lock(&self.store);
        let token = store.next_id("token-");
        store.tokens.insert(token.clone());
        token
    }

    /// Invalidate every issued token, as if they all expired.
    pub fn revoke_tokens(&self) {
        lock(&self.store).tokens.clear();
    }

    /// Every request received so far, as `"METHOD /path"`.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        lock(&self.store).log.clone()
    }

    /// How many times `request` (`"METHOD /path"`) was received.
    #[must_use]
    pub fn count(&self, request: &str) -> usize {
        lock(&self.store).log.iter().filter(|r| *r == request).count()
    }

    #[must_use]
    pub fn orders(&self) -> Vec<Value> {
        lock(&self.store).orders.clone()
    }

    #[must_use]
    pub fn payment_method(&self, id: &str) -> Option<Value> {
        lock(&self.store)
            .payment_methods
            .iter()
            .find(|m| m["_id"] == id)
            .cloned()
    }

    #[must_use]
    pub fn sellers(&self) -> Vec<Value> {
        lock(&self.store).sellers.clone()
    }
}

/// Start the storefront against `backend` and return its base URL.
pub async fn spawn_storefront(backend: &FakeBackend) -> String {
    let config = StorefrontConfig::local(backend.url()).expect("storefront config");
    let state = course_shop_storefront::state::AppState::new(config).expect("storefront state");
    let addr = serve(course_shop_storefront::app(state)).await;
    format!("http://{addr}")
}

/// Start the admin panel against `backend` and return its base URL.
pub async fn spawn_admin(backend: &FakeBackend) -> String {
    let config = AdminConfig::local(backend.url()).expect("admin config");
    let state = course_shop_admin::state::AppState::new(config).expect("admin state");
    let addr = serve(course_shop_admin::app(state)).await;
    format!("http://{addr}")
}

/// HTTP client that keeps cookies and follows redirects, like a browser.
#[must_use]
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Sign in to the admin panel at `admin_url` with the fake's credentials.
pub async fn sign_in(client: &reqwest::Client, admin_url: &str) -> reqwest::Response {
    client
        .post(format!("{admin_url}/login"))
        .form(&[("email", ADMIN_EMAIL), ("password", ADMIN_PASSWORD)])
        .send()
        .await
        .expect("login request")
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to address");
    let addr = listener.local_addr().expect("local address");
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server error");
    });
    addr
}

// =============================================================================
// Fake REST API
// =============================================================================

fn router(store: Shared) -> Router {
    Router::new()
        .route("/api/admin/login", post(login))
        .route("/api/admin/profile", get(profile))
        .route("/api/payment-methods/active", get(active_payment_methods))
        .route("/api/payment-methods/admin/all", get(all_payment_methods))
        .route("/api/payment-methods/admin/create", post(create_payment_method))
        .route(
            "/api/payment-methods/admin/update/{id}",
            put(update_payment_method),
        )
        .route(
            "/api/payment-methods/admin/delete/{id}",
            delete(delete_payment_method),
        )
        .route(
            "/api/payment-methods/admin/toggle-status/{id}",
            patch(toggle_payment_method),
        )
        .route("/api/sellers/admin/all", get(all_sellers))
        .route("/api/sellers/admin/create", post(create_seller))
        .route("/api/sellers/admin/toggle-status/{id}", patch(toggle_seller))
        .route("/api/sellers/admin/stats/{id}", get(seller_stats))
        .route("/api/orders/create", post(create_order))
        .route("/api/orders/{id}", get(order))
        .layer(middleware::from_fn_with_state(store.clone(), record))
        .with_state(store)
}

async fn record(State(store): State<Shared>, request: Request, next: Next) -> Response {
    let line = format!("{} {}", request.method(), request.uri().path());
    lock(&store).log.push(line);
    next.run(request).await
}

fn ok(mut payload: Value) -> Response {
    payload["success"] = json!(true);
    Json(payload).into_response()
}

fn failure(status: StatusCode, code: &str, message: &str) -> Response {
    let body = json!({ "success": false, "code": code, "message": message });
    (status, Json(body)).into_response()
}

fn unauthorized() -> Response {
    failure(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Not authorized, token failed")
}

fn authorized(store: &Shared, headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| lock(store).tokens.contains(token))
}

fn admin_document() -> Value {
    json!({ "_id": "a1", "name": ADMIN_NAME, "email": ADMIN_EMAIL })
}

fn seller_document(id: &str, name: &str, phone: &str, rate: f64, code: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "phone": phone,
        "commissionRate": rate,
        "sellerCode": code,
        "sellerUrl": format!("https://shop.example.com/order?ref={code}"),
        "isActive": true,
        "totalSales": 0,
    })
}

async fn login(State(store): State<Shared>, Json(body): Json<Value>) -> Response {
    if body["email"] != ADMIN_EMAIL || body["password"] != ADMIN_PASSWORD {
        return failure(
            StatusCode::UNAUTHORIZED,
            "INVALID_CREDENTIALS",
            "Invalid credentials",
        );
    }

    let mut store = lock(&store);
    let token = store.next_id("token-");
    store.tokens.insert(token.clone());
    ok(json!({ "token": token, "admin": admin_document() }))
}

async fn profile(State(store): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&store, &headers) {
        return unauthorized();
    }
    ok(json!({ "admin": admin_document() }))
}

async fn active_payment_methods(State(store): State<Shared>) -> Response {
    let methods: Vec<Value> = lock(&store)
        .payment_methods
        .iter()
        .filter(|m| m["isActive"] == true)
        .cloned()
        .collect();
    ok(json!({ "paymentMethods": methods }))
}

async fn all_payment_methods(State(store): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&store, &headers) {
        return unauthorized();
    }
    let methods = lock(&store).payment_methods.clone();
    ok(json!({ "paymentMethods": methods }))
}

/// Text fields and whether an `image` part was present.
async fn read_parts(mut multipart: Multipart) -> Option<(HashMap<String, String>, bool)> {
    let mut fields = HashMap::new();
    let mut has_image = false;
    while let Some(field) = multipart.next_field().await.ok()? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            has_image = !field.bytes().await.ok()?.is_empty();
        } else {
            fields.insert(name, field.text().await.ok()?);
        }
    }
    Some((fields, has_image))
}

async fn create_payment_method(
    State(store): State<Shared>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    if !authorized(&store, &headers) {
        return unauthorized();
    }
    let Some((fields, has_image)) = read_parts(multipart).await else {
        return failure(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "Malformed upload");
    };
    if !has_image {
        return failure(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "Image is required");
    }

    let mut store = lock(&store);
    let id = store.next_id("pm");
    let method = json!({
        "_id": id,
        "name": fields.get("name"),
        "number": fields.get("number"),
        "instructions": fields.get("instructions"),
        "image": { "url": format!("https://img.example.com/{id}.png") },
        "isActive": true,
    });
    store.payment_methods.push(method.clone());
    ok(json!({ "paymentMethod": method }))
}

async fn update_payment_method(
    State(store): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    if !authorized(&store, &headers) {
        return unauthorized();
    }
    let Some((fields, _)) = read_parts(multipart).await else {
        return failure(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "Malformed upload");
    };

    let mut store = lock(&store);
    let Some(method) = store.payment_methods.iter_mut().find(|m| m["_id"] == id) else {
        return failure(StatusCode::NOT_FOUND, "NOT_FOUND", "Payment method not found");
    };
    for key in ["name", "number", "instructions"] {
        if let Some(value) = fields.get(key) {
            method[key] = json!(value);
        }
    }
    if let Some(active) = fields.get("isActive") {
        method["isActive"] = json!(active == "true");
    }
    ok(json!({ "paymentMethod": method.clone() }))
}

async fn delete_payment_method(
    State(store): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&store, &headers) {
        return unauthorized();
    }
    let mut store = lock(&store);
    let before = store.payment_methods.len();
    store.payment_methods.retain(|m| m["_id"] != id);
    if store.payment_methods.len() == before {
        return failure(StatusCode::NOT_FOUND, "NOT_FOUND", "Payment method not found");
    }
    ok(json!({ "message": "Payment method deleted" }))
}

async fn toggle_payment_method(
    State(store): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&store, &headers) {
        return unauthorized();
    }
    let mut store = lock(&store);
    let Some(method) = store.payment_methods.iter_mut().find(|m| m["_id"] == id) else {
        return failure(StatusCode::NOT_FOUND, "NOT_FOUND", "Payment method not found");
    };
    method["isActive"] = json!(method["isActive"] != true);
    ok(json!({ "paymentMethod": method.clone() }))
}

async fn all_sellers(State(store): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&store, &headers) {
        return unauthorized();
    }
    let sellers = lock(&store).sellers.clone();
    ok(json!({ "sellers": sellers }))
}

async fn create_seller(
    State(store): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&store, &headers) {
        return unauthorized();
    }
    let name = body["name"].as_str().unwrap_or_default();
    let phone = body["phone"].as_str().unwrap_or_default();
    let rate = body["commissionRate"].as_f64().unwrap_or(10.0);

    let mut store = lock(&store);
    let id = store.next_id("s");
    let prefix: String = name
        .chars()
        .filter(char::is_ascii_alphabetic)
        .take(5)
        .collect::<String>()
        .to_uppercase();
    let code = format!("{prefix}{:02}", store.sellers.len() + 1);
    let mut seller = seller_document(&id, name, phone, rate, &code);
    seller["email"] = body["email"].clone();
    store.sellers.push(seller.clone());
    ok(json!({ "seller": seller }))
}

async fn toggle_seller(
    State(store): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&store, &headers) {
        return unauthorized();
    }
    let mut store = lock(&store);
    let Some(seller) = store.sellers.iter_mut().find(|s| s["_id"] == id) else {
        return failure(StatusCode::NOT_FOUND, "NOT_FOUND", "Seller not found");
    };
    seller["isActive"] = json!(seller["isActive"] != true);
    ok(json!({ "seller": seller.clone() }))
}

async fn seller_stats(
    State(store): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&store, &headers) {
        return unauthorized();
    }
    let store = lock(&store);
    let Some(seller) = store.sellers.iter().find(|s| s["_id"] == id) else {
        return failure(StatusCode::NOT_FOUND, "NOT_FOUND", "Seller not found");
    };
    let orders = store
        .orders
        .iter()
        .filter(|o| o["sellerCode"] == seller["sellerCode"])
        .count();
    let revenue = orders * ORDER_AMOUNT;
    ok(json!({
        "stats": {
            "totalOrders": orders,
            "confirmedOrders": 0,
            "totalRevenue": revenue,
            "totalCommission": 0,
            "conversionRate": 0,
        }
    }))
}

async fn create_order(
    State(store): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let key = headers
        .get("idempotency-key")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let mut store = lock(&store);
    if let Some(order) = key.as_ref().and_then(|key| store.replays.get(key)) {
        return ok(json!({ "order": order }));
    }

    let Some(method) = store
        .payment_methods
        .iter()
        .find(|m| m["_id"] == body["paymentMethod"] && m["isActive"] == true)
        .cloned()
    else {
        return failure(
            StatusCode::BAD_REQUEST,
            "INACTIVE_PAYMENT_METHOD",
            "Invalid or inactive payment method",
        );
    };

    if store
        .orders
        .iter()
        .any(|o| o["transactionId"] == body["transactionId"])
    {
        return failure(
            StatusCode::BAD_REQUEST,
            "DUPLICATE_TRANSACTION",
            "Transaction ID already exists",
        );
    }

    let id = store.next_id("o");
    let order = json!({
        "_id": id,
        "orderNumber": format!("ORD-{}", 1001 + store.orders.len()),
        "customerName": body["customerName"],
        "customerEmail": body["customerEmail"],
        "customerPhone": body["customerPhone"],
        "paymentMethod": { "_id": method["_id"], "name": method["name"], "number": method["number"] },
        "transactionId": body["transactionId"],
        "sellerCode": body["sellerCode"],
        "amount": ORDER_AMOUNT,
        "status": "pending",
    });
    store.orders.push(order.clone());
    if let Some(key) = key {
        store.replays.insert(key, order.clone());
    }
    ok(json!({ "order": order }))
}

async fn order(State(store): State<Shared>, Path(id): Path<String>) -> Response {
    match lock(&store).orders.iter().find(|o| o["_id"] == id) {
        Some(order) => ok(json!({ "order": order })),
        None => failure(StatusCode::NOT_FOUND, "NOT_FOUND", "Order not found"),
    }
}
