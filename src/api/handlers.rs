use crate::application::{
    ServiceDependencies,
    catalog::{self, SearchType},
    circulation, fees, reporting,
};
use crate::domain::{
    Book, BookId,
    commands::{AddBook, BorrowBook, PayLateFees, RefundLateFee, ReturnBook},
};
use crate::ports::PaymentGateway;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        AddBookRequest, BookAddedResponse, BorrowResponse, LateFeeResponse, MessageResponse,
        PatronBookRequest, PatronStatusResponse, PayLateFeesRequest, PaymentResponse,
        RefundRequest, SearchQuery,
    },
};

// ============================================================================
// State
// ============================================================================

/// Application state shared between handlers
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
    pub payment_gateway: Arc<dyn PaymentGateway>,
}

// ============================================================================
// Catalog
// ============================================================================

/// GET /books - the whole catalog
pub async fn list_books(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = catalog::list_catalog(&state.service_deps).await?;
    Ok(Json(books))
}

/// POST /books - add a book to the catalog
pub async fn add_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddBookRequest>,
) -> Result<(StatusCode, Json<BookAddedResponse>), ApiError> {
    let cmd = AddBook {
        title: req.title,
        author: req.author,
        isbn: req.isbn,
        total_copies: req.total_copies,
    };

    let added = catalog::add_book(&state.service_deps, cmd).await?;

    let response = BookAddedResponse {
        book_id: added.book_id.value(),
        message: added.message(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /books/search?q=...&type=title|author|isbn
///
/// A missing term or an unknown type yields an empty list, not an error.
pub async fn search_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let term = query.q.unwrap_or_default();
    let search_type = query
        .search_type
        .as_deref()
        .unwrap_or("title")
        .parse::<SearchType>();

    let books = match search_type {
        Ok(search_type) => catalog::search_books(&state.service_deps, &term, search_type).await?,
        Err(_) => Vec::new(),
    };

    Ok(Json(books))
}

// ============================================================================
// Circulation
// ============================================================================

/// POST /borrowings - lend a copy to a patron
pub async fn borrow_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PatronBookRequest>,
) -> Result<(StatusCode, Json<BorrowResponse>), ApiError> {
    let cmd = BorrowBook {
        patron_id: req.patron_id,
        book_id: BookId::new(req.book_id),
        borrowed_at: chrono::Utc::now(),
    };

    let receipt = circulation::borrow_book(&state.service_deps, cmd).await?;

    let response = BorrowResponse {
        message: receipt.message(),
        patron_id: receipt.record.patron_id.to_string(),
        book_id: receipt.record.book_id.value(),
        borrowed_at: receipt.record.borrowed_at,
        due_date: receipt.record.due_date,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /returns - take a copy back
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PatronBookRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let cmd = ReturnBook {
        patron_id: req.patron_id,
        book_id: BookId::new(req.book_id),
        returned_at: chrono::Utc::now(),
    };

    let message = circulation::return_book(&state.service_deps, cmd).await?;

    Ok(Json(MessageResponse::new(message)))
}

// ============================================================================
// Late fees
// ============================================================================

/// GET /patrons/:patron_id/books/:book_id/late-fee
pub async fn get_late_fee(
    State(state): State<Arc<AppState>>,
    Path((patron_id, book_id)): Path<(String, i64)>,
) -> Result<Json<LateFeeResponse>, ApiError> {
    let result = fees::calculate_late_fee(
        &state.service_deps,
        &patron_id,
        BookId::new(book_id),
        chrono::Utc::now(),
    )
    .await?;

    Ok(Json(LateFeeResponse::from(result)))
}

/// POST /late-fees/payments - charge the late fee of one borrow
pub async fn pay_late_fees(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PayLateFeesRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let cmd = PayLateFees {
        patron_id: req.patron_id,
        book_id: BookId::new(req.book_id),
        as_of: chrono::Utc::now(),
    };

    let receipt =
        fees::pay_late_fees(&state.service_deps, state.payment_gateway.as_ref(), cmd).await?;

    Ok(Json(PaymentResponse {
        transaction_id: receipt.transaction_id,
        amount_cents: receipt.amount.cents(),
        message: receipt.message,
    }))
}

/// POST /late-fees/refunds - refund a late fee payment
pub async fn refund_late_fee(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefundRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let cmd = RefundLateFee {
        amount: req.amount(),
        transaction_id: req.transaction_id,
    };

    let message =
        fees::refund_late_fee_payment(&state.service_deps, state.payment_gateway.as_ref(), cmd)
            .await?;

    Ok(Json(MessageResponse::new(message)))
}

// ============================================================================
// Reporting
// ============================================================================

/// GET /patrons/:patron_id/status
pub async fn get_patron_status(
    State(state): State<Arc<AppState>>,
    Path(patron_id): Path<String>,
) -> Result<Json<PatronStatusResponse>, ApiError> {
    let report =
        reporting::get_patron_status_report(&state.service_deps, &patron_id, chrono::Utc::now())
            .await?;

    Ok(Json(PatronStatusResponse::from(report)))
}
