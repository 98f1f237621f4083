use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, add_book, borrow_book, get_late_fee, get_patron_status, list_books, pay_late_fees,
    refund_late_fee, return_book, search_books,
};

/// Creates the API router
///
/// Catalog:
/// - GET /books, POST /books, GET /books/search
///
/// Circulation:
/// - POST /borrowings, POST /returns
///
/// Late fees:
/// - GET /patrons/:patron_id/books/:book_id/late-fee
/// - POST /late-fees/payments, POST /late-fees/refunds
///
/// Reporting:
/// - GET /patrons/:patron_id/status
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/books", get(list_books).post(add_book))
        .route("/books/search", get(search_books))
        .route("/borrowings", post(borrow_book))
        .route("/returns", post(return_book))
        .route(
            "/patrons/:patron_id/books/:book_id/late-fee",
            get(get_late_fee),
        )
        .route("/late-fees/payments", post(pay_late_fees))
        .route("/late-fees/refunds", post(refund_late_fee))
        .route("/patrons/:patron_id/status", get(get_patron_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
