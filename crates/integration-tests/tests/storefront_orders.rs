//! Order intake through the storefront against the fake backend.

#![allow(clippy::unwrap_used)]

use course_shop_integration_tests::{FakeBackend, browser, spawn_storefront};
use reqwest::StatusCode;

const CREATE_ORDER: &str = "POST /api/orders/create";

struct OrderInput<'a> {
    name: &'a str,
    payment_method: &'a str,
    transaction_id: &'a str,
    submission_id: String,
    seller_code: Option<&'a str>,
}

impl<'a> OrderInput<'a> {
    fn new(payment_method: &'a str, transaction_id: &'a str) -> Self {
        Self {
            name: "Rahim Uddin",
            payment_method,
            transaction_id,
            submission_id: uuid::Uuid::new_v4().to_string(),
            seller_code: None,
        }
    }

    fn fields(&self) -> Vec<(&str, &str)> {
        let mut fields = vec![
            ("name", self.name),
            ("email", "rahim@example.com"),
            ("phone", "01712345678"),
            ("payment_method", self.payment_method),
            ("transaction_id", self.transaction_id),
            ("submission_id", self.submission_id.as_str()),
        ];
        if let Some(code) = self.seller_code {
            fields.push(("seller_code", code));
        }
        fields
    }
}

async fn submit(storefront: &str, input: &OrderInput<'_>) -> (StatusCode, String) {
    let response = browser()
        .post(format!("{storefront}/order"))
        .form(&input.fields())
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.text().await.unwrap())
}

#[tokio::test]
async fn test_reused_transaction_id_is_reported_as_duplicate() {
    let backend = FakeBackend::spawn().await;
    let bkash = backend.seed_payment_method("bKash", "01712345678", true);
    let storefront = spawn_storefront(&backend).await;

    let (status, html) = submit(&storefront, &OrderInput::new(&bkash, "TXN12345")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("অর্ডার সফল হয়েছে"));
    assert!(html.contains("ORD-1001"));

    // A fresh render carries a new submission ID, so this is a real repeat
    let (status, html) = submit(&storefront, &OrderInput::new(&bkash, "TXN12345")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("Transaction ID ইতিমধ্যে ব্যবহৃত"));
    assert!(html.contains("value=\"TXN12345\""));

    assert_eq!(backend.count(CREATE_ORDER), 2);
    assert_eq!(backend.orders().len(), 1);
}

#[tokio::test]
async fn test_double_submit_of_one_form_places_one_order() {
    let backend = FakeBackend::spawn().await;
    let bkash = backend.seed_payment_method("bKash", "01712345678", true);
    let storefront = spawn_storefront(&backend).await;

    let input = OrderInput::new(&bkash, "TXN99999");
    let (first, first_html) = submit(&storefront, &input).await;
    let (second, second_html) = submit(&storefront, &input).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert!(first_html.contains("ORD-1001"));
    assert!(second_html.contains("ORD-1001"));
    assert_eq!(backend.orders().len(), 1);
}

#[tokio::test]
async fn test_empty_name_never_reaches_backend() {
    let backend = FakeBackend::spawn().await;
    let bkash = backend.seed_payment_method("bKash", "01712345678", true);
    let storefront = spawn_storefront(&backend).await;

    let mut input = OrderInput::new(&bkash, "TXN12345");
    input.name = "";
    let (status, html) = submit(&storefront, &input).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("নাম অবশ্যই দিতে হবে"));
    assert_eq!(backend.count(CREATE_ORDER), 0);
}

#[tokio::test]
async fn test_referral_code_is_carried_into_order() {
    let backend = FakeBackend::spawn().await;
    let bkash = backend.seed_payment_method("bKash", "01712345678", true);
    let storefront = spawn_storefront(&backend).await;

    let html = browser()
        .get(format!("{storefront}/order?ref=KARIM01"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains(r#"name="seller_code" value="KARIM01""#));

    let mut input = OrderInput::new(&bkash, "TXN55555");
    input.seller_code = Some("KARIM01");
    let (status, _) = submit(&storefront, &input).await;

    assert_eq!(status, StatusCode::OK);
    let orders = backend.orders();
    assert_eq!(orders.first().unwrap()["sellerCode"], "KARIM01");
}

#[tokio::test]
async fn test_order_without_referral_sends_null_seller_code() {
    let backend = FakeBackend::spawn().await;
    let bkash = backend.seed_payment_method("bKash", "01712345678", true);
    let storefront = spawn_storefront(&backend).await;

    let (status, _) = submit(&storefront, &OrderInput::new(&bkash, "TXN77777")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(backend.orders().first().unwrap()["sellerCode"].is_null());
}

#[tokio::test]
async fn test_inactive_payment_method_is_rejected() {
    let backend = FakeBackend::spawn().await;
    backend.seed_payment_method("bKash", "01712345678", true);
    let nagad = backend.seed_payment_method("Nagad", "01812345678", false);
    let storefront = spawn_storefront(&backend).await;

    let (status, html) = submit(&storefront, &OrderInput::new(&nagad, "TXN12345")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("পেমেন্ট পদ্ধতি সমস্যা"));
    assert!(backend.orders().is_empty());
}

#[tokio::test]
async fn test_order_form_lists_only_active_methods() {
    let backend = FakeBackend::spawn().await;
    backend.seed_payment_method("bKash", "01712345678", true);
    backend.seed_payment_method("Rocket", "01912345678", false);
    let storefront = spawn_storefront(&backend).await;

    let html = browser()
        .get(format!("{storefront}/order"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("bKash"));
    assert!(!html.contains("Rocket"));
    assert!(html.contains(r#"data-copy="01712345678""#));
}
