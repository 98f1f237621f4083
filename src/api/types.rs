use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::reporting::PatronStatusReport;
use crate::domain::{BorrowRecord, LateFeeResult, Money};

/// POST /books
#[derive(Debug, Deserialize)]
pub struct AddBookRequest {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_copies: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookAddedResponse {
    pub book_id: i64,
    pub message: String,
}

/// GET /books/search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub search_type: Option<String>,
}

/// POST /borrowings and POST /returns
#[derive(Debug, Deserialize)]
pub struct PatronBookRequest {
    pub patron_id: String,
    pub book_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BorrowResponse {
    pub patron_id: String,
    pub book_id: i64,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// GET /patrons/:patron_id/books/:book_id/late-fee
#[derive(Debug, Serialize, Deserialize)]
pub struct LateFeeResponse {
    pub fee_amount_cents: i64,
    pub fee_amount: String,
    pub days_overdue: u32,
    pub status: String,
}

impl From<LateFeeResult> for LateFeeResponse {
    fn from(result: LateFeeResult) -> Self {
        Self {
            fee_amount_cents: result.fee_amount.cents(),
            fee_amount: result.fee_amount.to_string(),
            days_overdue: result.days_overdue,
            status: result.status.as_str().to_string(),
        }
    }
}

/// GET /patrons/:patron_id/status
#[derive(Debug, Serialize, Deserialize)]
pub struct PatronStatusResponse {
    pub patron_id: String,
    pub borrowed_books: Vec<BorrowRecord>,
    pub total_late_fees_cents: i64,
    pub total_late_fees: String,
    pub borrow_count: usize,
}

impl From<PatronStatusReport> for PatronStatusResponse {
    fn from(report: PatronStatusReport) -> Self {
        Self {
            patron_id: report.patron_id,
            borrowed_books: report.borrowed_books,
            total_late_fees_cents: report.total_late_fees.cents(),
            total_late_fees: report.total_late_fees.to_string(),
            borrow_count: report.borrow_count,
        }
    }
}

/// POST /late-fees/payments
#[derive(Debug, Deserialize)]
pub struct PayLateFeesRequest {
    pub patron_id: String,
    pub book_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub transaction_id: String,
    pub amount_cents: i64,
    pub message: String,
}

/// POST /late-fees/refunds
#[derive(Debug, Deserialize)]
pub struct RefundRequest {
    pub transaction_id: String,
    pub amount_cents: i64,
}

impl RefundRequest {
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error_type.into(),
            message: message.into(),
        }
    }
}
