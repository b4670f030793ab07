use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use enrollment_engine::{
    db_types::GatewayOrder,
    CheckoutFlowApi,
    EnquiryApi,
    LedgerError,
    PaymentGatewayError,
};
use ldg_common::Paise;
use razorpay_tools::{signature::payment_signature, RazorpayConfig};
use serde_json::json;

use super::{
    helpers::{json, send_request},
    mocks::{MockGateway, MockLedger},
};
use crate::{
    checkout_routes::{CompleteCheckoutRoute, StartCheckoutRoute},
    config::{ServerConfig, ServerOptions, WidgetSettings},
    integrations::RazorpayGateway,
    routes::{CreateOrderRoute, SaveToSheetRoute, SubmitEnquiryRoute, VerifyPaymentRoute},
};

fn order(amount: Paise) -> GatewayOrder {
    GatewayOrder {
        order_id: "order_abc".into(),
        amount,
        currency: "INR".into(),
        receipt: Some("rcpt_1".into()),
        status: "created".into(),
    }
}

fn razorpay(secret: Option<&str>) -> RazorpayGateway {
    let config = RazorpayConfig {
        api_url: "http://127.0.0.1:9/v1".into(),
        key_id: "rzp_test_key".into(),
        key_secret: secret.map(|s| s.to_string().into()),
    };
    RazorpayGateway::new(config).unwrap()
}

fn configure_checkout(gateway: MockGateway, ledger: MockLedger) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        let mut config = ServerConfig::default();
        config.razorpay.key_id = "rzp_test_key".into();
        cfg.app_data(web::Data::new(CheckoutFlowApi::new(gateway, ledger)))
            .app_data(web::Data::new(ServerOptions::default()))
            .app_data(web::Data::new(WidgetSettings::from_config(&config)))
            .service(
                web::scope("/api")
                    .service(CreateOrderRoute::<MockGateway, MockLedger>::new())
                    .service(VerifyPaymentRoute::<MockGateway, MockLedger>::new())
                    .service(SaveToSheetRoute::<MockGateway, MockLedger>::new())
                    .service(StartCheckoutRoute::<MockGateway, MockLedger>::new())
                    .service(CompleteCheckoutRoute::<MockGateway, MockLedger>::new()),
            );
    }
}

fn configure_verify(gateway: RazorpayGateway, ledger: MockLedger) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        cfg.app_data(web::Data::new(CheckoutFlowApi::new(gateway, ledger)))
            .service(VerifyPaymentRoute::<RazorpayGateway, MockLedger>::new())
            .service(CompleteCheckoutRoute::<RazorpayGateway, MockLedger>::new());
    }
}

#[actix_web::test]
async fn create_order_in_paise() {
    let _ = env_logger::try_init().ok();
    let mut gateway = MockGateway::new();
    gateway
        .expect_create_order()
        .withf(|o| o.amount == Paise::from(199_900) && o.currency == "INR" && o.receipt.starts_with("rcpt_"))
        .times(1)
        .returning(|o| Ok(order(o.amount)));
    let req = TestRequest::post().uri("/api/order").set_json(json!({ "amount": 1999, "currency": "INR" }));
    let (status, body) = send_request(req, configure_checkout(gateway, MockLedger::new())).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["orderId"], "order_abc");
    assert_eq!(body["amount"], 199_900);
}

#[actix_web::test]
async fn create_order_rejects_non_positive_amounts() {
    let _ = env_logger::try_init().ok();
    let mut gateway = MockGateway::new();
    gateway.expect_create_order().never();
    let req = TestRequest::post().uri("/api/order").set_json(json!({ "amount": 0 }));
    let (status, _) = send_request(req, configure_checkout(gateway, MockLedger::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn gateway_failures_are_server_errors() {
    let _ = env_logger::try_init().ok();
    let mut gateway = MockGateway::new();
    gateway
        .expect_create_order()
        .returning(|_| Err(PaymentGatewayError::CommunicationError("connection refused".into())));
    let req = TestRequest::post().uri("/api/order").set_json(json!({ "amount": 499 }));
    let (status, body) = send_request(req, configure_checkout(gateway, MockLedger::new())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json(&body)["error"].as_str().is_some_and(|s| s.contains("connection refused")));
}

#[actix_web::test]
async fn verify_good_signature() {
    let _ = env_logger::try_init().ok();
    let signature = payment_signature("s3cr3t", "order_abc", "pay_123");
    let req = TestRequest::post().uri("/verify").set_json(json!({
        "orderCreationId": "order_abc",
        "razorpayPaymentId": "pay_123",
        "razorpaySignature": signature,
    }));
    let (status, body) = send_request(req, configure_verify(razorpay(Some("s3cr3t")), MockLedger::new())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!({ "success": true, "message": "Payment verified successfully." }));
}

#[actix_web::test]
async fn verify_tampered_signature() {
    let _ = env_logger::try_init().ok();
    let mut signature = payment_signature("s3cr3t", "order_abc", "pay_123");
    let last = if signature.ends_with('0') { "1" } else { "0" };
    signature.replace_range(signature.len() - 1.., last);
    let req = TestRequest::post().uri("/verify").set_json(json!({
        "orderCreationId": "order_abc",
        "razorpayPaymentId": "pay_123",
        "razorpaySignature": signature,
    }));
    let (status, body) = send_request(req, configure_verify(razorpay(Some("s3cr3t")), MockLedger::new())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body), json!({ "success": false, "message": "Payment verification failed." }));
}

#[actix_web::test]
async fn verify_without_secret() {
    let _ = env_logger::try_init().ok();
    let req = TestRequest::post().uri("/verify").set_json(json!({
        "orderCreationId": "order_abc",
        "razorpayPaymentId": "pay_123",
        "razorpaySignature": "00",
    }));
    let (status, _) = send_request(req, configure_verify(razorpay(None), MockLedger::new())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn save_to_sheet() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger
        .expect_append_row()
        .withf(|row| {
            row.len() == 9 &&
                row[..8] ==
                    ["Asha", "asha@example.com", "9999999999", "Science", "B.Sc", "1999", "pay_123", "order_abc"]
        })
        .times(1)
        .returning(|_| Ok(()));
    let req = TestRequest::post().uri("/api/saveToSheet").set_json(json!({
        "fullName": "Asha",
        "email": "asha@example.com",
        "contact": "9999999999",
        "stream": "Science",
        "qualification": "B.Sc",
        "amount": 1999,
        "paymentId": "pay_123",
        "orderId": "order_abc",
    }));
    let (status, body) = send_request(req, configure_checkout(MockGateway::new(), ledger)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!({ "success": true }));
}

#[actix_web::test]
async fn save_to_sheet_failure() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger.expect_append_row().returning(|_| Err(LedgerError::AppendFailed("quota exceeded".into())));
    let req = TestRequest::post().uri("/api/saveToSheet").set_json(json!({
        "fullName": "Asha",
        "amount": 1999,
        "paymentId": "pay_123",
        "orderId": "order_abc",
    }));
    let (status, body) = send_request(req, configure_checkout(MockGateway::new(), ledger)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = json(&body);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Could not append the row. quota exceeded");
}

#[actix_web::test]
async fn enquiries() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger
        .expect_append_row()
        .withf(|row| row == &["Asha", "9999999999", "Science", "B.Sc"])
        .times(1)
        .returning(|_| Ok(()));
    let configure = move |cfg: &mut ServiceConfig| {
        cfg.app_data(web::Data::new(EnquiryApi::new(ledger))).service(SubmitEnquiryRoute::<MockLedger>::new());
    };
    let req = TestRequest::post().uri("/googleSheets").set_json(json!({
        "name": "Asha",
        "contactNumber": "9999999999",
        "stream": "Science",
        "qualification": "B.Sc",
    }));
    let (status, body) = send_request(req, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!({ "success": true }));
}

#[actix_web::test]
async fn incomplete_enquiries_are_rejected() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger.expect_append_row().never();
    let configure = move |cfg: &mut ServiceConfig| {
        cfg.app_data(web::Data::new(EnquiryApi::new(ledger))).service(SubmitEnquiryRoute::<MockLedger>::new());
    };
    let req = TestRequest::post().uri("/googleSheets").set_json(json!({ "name": "Asha" }));
    let (status, body) = send_request(req, configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = json(&body);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().is_some_and(|m| m.contains("contactNumber, stream, qualification")));
}

#[actix_web::test]
async fn start_checkout() {
    let _ = env_logger::try_init().ok();
    let mut gateway = MockGateway::new();
    gateway.expect_create_order().times(1).returning(|o| Ok(order(o.amount)));
    let req = TestRequest::post().uri("/api/checkout").set_json(json!({
        "amount": "1,999 Rs",
        "prefill": { "name": "Asha", "email": "asha@example.com", "contact": "9999999999" }
    }));
    let (status, body) = send_request(req, configure_checkout(gateway, MockLedger::new())).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["orderId"], "order_abc");
    assert_eq!(body["state"], "OrderCreated");
    assert_eq!(body["scriptUrl"], "https://checkout.razorpay.com/v1/checkout.js");
    assert_eq!(body["scriptId"], "razorpay-script");
    let options = &body["options"];
    assert_eq!(options["key"], "rzp_test_key");
    assert_eq!(options["amount"], 199_900);
    assert_eq!(options["order_id"], "order_abc");
    assert_eq!(options["name"], "Learning Destiny");
    assert_eq!(options["theme"]["color"], "#FBA758");
    assert_eq!(options["prefill"]["email"], "asha@example.com");
}

fn completion_body(signature: &str) -> serde_json::Value {
    json!({
        "orderCreationId": "order_abc",
        "razorpayPaymentId": "pay_123",
        "razorpaySignature": signature,
        "fullName": "Asha",
        "email": "asha@example.com",
        "contact": "9999999999",
        "stream": "Science",
        "qualification": "B.Sc",
        "amount": 1999
    })
}

#[actix_web::test]
async fn complete_checkout_saves_verified_payments() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger.expect_append_row().times(1).returning(|_| Ok(()));
    let signature = payment_signature("s3cr3t", "order_abc", "pay_123");
    let req = TestRequest::post().uri("/checkout/complete").set_json(completion_body(&signature));
    let (status, body) = send_request(req, configure_verify(razorpay(Some("s3cr3t")), ledger)).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["state"], "Saved");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Payment completed and details saved successfully.");
}

#[actix_web::test]
async fn complete_checkout_rejects_forged_payments() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger.expect_append_row().never();
    let signature = payment_signature("wrong secret", "order_abc", "pay_123");
    let req = TestRequest::post().uri("/checkout/complete").set_json(completion_body(&signature));
    let (status, body) = send_request(req, configure_verify(razorpay(Some("s3cr3t")), ledger)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = json(&body);
    assert_eq!(body["state"], "VerificationFailed");
    assert_eq!(body["message"], "Payment verification failed.");
}

#[actix_web::test]
async fn complete_checkout_reports_lost_rows() {
    let _ = env_logger::try_init().ok();
    let mut ledger = MockLedger::new();
    ledger.expect_append_row().returning(|_| Err(LedgerError::NotConfigured("no spreadsheet id".into())));
    let signature = payment_signature("s3cr3t", "order_abc", "pay_123");
    let req = TestRequest::post().uri("/checkout/complete").set_json(completion_body(&signature));
    let (status, body) = send_request(req, configure_verify(razorpay(Some("s3cr3t")), ledger)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = json(&body);
    assert_eq!(body["state"], "SaveFailed");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to save data to Google Sheets.");
}

#[actix_web::test]
async fn verify_requires_the_exact_digest() {
    let _ = env_logger::try_init().ok();
    let signature = payment_signature("s3cr3t", "order_abc", "pay_123");
    for supplied in [signature.to_uppercase(), format!(" {signature} ")] {
        let req = TestRequest::post().uri("/verify").set_json(json!({
            "orderCreationId": "order_abc",
            "razorpayPaymentId": "pay_123",
            "razorpaySignature": supplied,
        }));
        let (status, body) = send_request(req, configure_verify(razorpay(Some("s3cr3t")), MockLedger::new())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["success"], false);
    }
}
