use axum::body::Body;
use axum::http::{Request, StatusCode};
use rusty_library_lending::adapters::mock::{
    BookRepository, BorrowRecordRepository, GatewayBehavior, PaymentGateway,
};
use rusty_library_lending::api::handlers::AppState;
use rusty_library_lending::api::router::create_router;
use rusty_library_lending::api::types::*;
use rusty_library_lending::application::ServiceDependencies;
use rusty_library_lending::domain::{BookId, PatronId, borrow_record};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// Helpers
// ============================================================================

struct TestApp {
    router: axum::Router,
    borrow_records: Arc<BorrowRecordRepository>,
    gateway: Arc<PaymentGateway>,
}

/// The real router over in-memory stores and the mock gateway
fn setup_app() -> TestApp {
    let books = Arc::new(BookRepository::new());
    let borrow_records = Arc::new(BorrowRecordRepository::new());
    let gateway = Arc::new(PaymentGateway::new());

    let service_deps = ServiceDependencies::new(books, borrow_records.clone());
    let state = Arc::new(AppState {
        service_deps,
        payment_gateway: gateway.clone(),
    });

    TestApp {
        router: create_router(state),
        borrow_records,
        gateway,
    }
}

async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

async fn add_gatsby(app: &TestApp) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/books",
        Some(json!({
            "title": "The Great Gatsby",
            "author": "F. Scott Fitzgerald",
            "isbn": "9780743273565",
            "total_copies": 1,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let added: BookAddedResponse = serde_json::from_value(body).unwrap();
    added.book_id
}

// ============================================================================
// Flows
// ============================================================================

#[tokio::test]
async fn test_e2e_health() {
    let app = setup_app();

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_e2e_catalog_flow() {
    let app = setup_app();

    // Step 1: add
    let book_id = add_gatsby(&app).await;
    assert_eq!(book_id, 1);

    // Step 2: the same ISBN again
    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({
            "title": "Another Title",
            "author": "Someone",
            "isbn": "9780743273565",
            "total_copies": 2,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "DUPLICATE_ISBN");
    assert!(body["message"].as_str().unwrap().contains("already exists"));

    // Step 3: validation failure
    let (status, body) = send(
        &app,
        "POST",
        "/books",
        Some(json!({
            "title": "  ",
            "author": "Someone",
            "isbn": "9780743273566",
            "total_copies": 1,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Title is required.");

    // Step 4: search
    let (status, body) = send(&app, "GET", "/books/search?q=gatsby&type=title", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["isbn"], "9780743273565");

    let (_, body) = send(&app, "GET", "/books/search?q=gatsby&type=publisher", None).await;
    assert_eq!(body, json!([]));

    // Step 5: list
    let (status, body) = send(&app, "GET", "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_e2e_borrow_and_return_flow() {
    let app = setup_app();
    let book_id = add_gatsby(&app).await;

    // Step 1: borrow
    let (status, body) = send(
        &app,
        "POST",
        "/borrowings",
        Some(json!({ "patron_id": "123456", "book_id": book_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let borrowed: BorrowResponse = serde_json::from_value(body).unwrap();
    assert_eq!(borrowed.patron_id, "123456");
    assert!(borrowed.message.starts_with("Successfully borrowed \"The Great Gatsby\""));

    // Step 2: the only copy is out
    let (status, body) = send(
        &app,
        "POST",
        "/borrowings",
        Some(json!({ "patron_id": "654321", "book_id": book_id })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "This book is currently not available.");

    // Step 3: status while borrowed
    let (status, body) = send(&app, "GET", "/patrons/123456/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["borrow_count"], 1);
    assert_eq!(body["total_late_fees_cents"], 0);
    assert_eq!(body["total_late_fees"], "$0.00");

    // Step 4: no fee yet
    let uri = format!("/patrons/123456/books/{}/late-fee", book_id);
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let fee: LateFeeResponse = serde_json::from_value(body).unwrap();
    assert_eq!(fee.status, "success");
    assert_eq!(fee.fee_amount_cents, 0);

    // Step 5: return
    let (status, body) = send(
        &app,
        "POST",
        "/returns",
        Some(json!({ "patron_id": "123456", "book_id": book_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book returned successfully.");

    // Step 6: nothing left to return or charge
    let (status, _) = send(
        &app,
        "POST",
        "/returns",
        Some(json!({ "patron_id": "123456", "book_id": book_id })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(body["status"], "no-active-record");

    let (_, body) = send(&app, "GET", "/patrons/123456/status", None).await;
    assert_eq!(body["borrow_count"], 0);
    assert_eq!(body["borrowed_books"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_e2e_invalid_ids() {
    let app = setup_app();

    let (status, body) = send(
        &app,
        "POST",
        "/borrowings",
        Some(json!({ "patron_id": "12ab56", "book_id": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_ID");

    let (status, body) = send(&app, "GET", "/patrons/abc/books/0/late-fee", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "invalid-input");

    let (status, body) = send(&app, "GET", "/patrons/abc/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patron_id"], "abc");
    assert_eq!(body["borrow_count"], 0);
}

#[tokio::test]
async fn test_e2e_patron_status_reports_fees_in_cents_and_dollars() {
    let app = setup_app();
    let book_id = add_gatsby(&app).await;

    // borrowed 20 days ago: 6 days overdue
    app.borrow_records.seed(borrow_record::open_borrow_record(
        PatronId::parse("123456").unwrap(),
        BookId::new(book_id),
        chrono::Utc::now() - chrono::Duration::days(20),
    ));

    let (status, body) = send(&app, "GET", "/patrons/123456/status", None).await;
    assert_eq!(status, StatusCode::OK);

    let report: PatronStatusResponse = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(report.patron_id, "123456");
    assert_eq!(report.borrow_count, 1);
    assert_eq!(report.borrowed_books.len(), 1);
    assert_eq!(report.total_late_fees_cents, 300);
    assert_eq!(report.total_late_fees, "$3.00");
    assert!(body.get("total_late_fees_cents").is_some());
}

#[tokio::test]
async fn test_e2e_late_fee_payment_flow() {
    let app = setup_app();
    let book_id = add_gatsby(&app).await;

    // borrowed 24 days ago: 10 days overdue
    app.borrow_records.seed(borrow_record::open_borrow_record(
        PatronId::parse("123456").unwrap(),
        BookId::new(book_id),
        chrono::Utc::now() - chrono::Duration::days(24),
    ));

    let (status, body) = send(
        &app,
        "POST",
        "/late-fees/payments",
        Some(json!({ "patron_id": "123456", "book_id": book_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let payment: PaymentResponse = serde_json::from_value(body).unwrap();
    assert_eq!(payment.amount_cents, 500);
    assert!(payment.transaction_id.starts_with("txn_"));
    assert_eq!(payment.message, "Payment successful! Payment processed");

    // declined charge
    app.gateway
        .set_behavior(GatewayBehavior::Decline("Card declined".into()));
    let (status, body) = send(
        &app,
        "POST",
        "/late-fees/payments",
        Some(json!({ "patron_id": "123456", "book_id": book_id })),
    )
    .await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["message"], "Payment failed: Card declined");
}

#[tokio::test]
async fn test_e2e_refund_validation() {
    let app = setup_app();

    let (status, body) = send(
        &app,
        "POST",
        "/late-fees/refunds",
        Some(json!({ "transaction_id": "txn_1", "amount_cents": 1501 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Refund amount exceeds maximum late fee.");

    let (status, body) = send(
        &app,
        "POST",
        "/late-fees/refunds",
        Some(json!({ "transaction_id": "", "amount_cents": 500 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid transaction ID.");
    assert!(app.gateway.refunds().is_empty());

    let (status, body) = send(
        &app,
        "POST",
        "/late-fees/refunds",
        Some(json!({ "transaction_id": "txn_1", "amount_cents": 500 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let refund: MessageResponse = serde_json::from_value(body).unwrap();
    assert_eq!(refund.message, "Refund successful");
}
