use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, Money};

// Patron ids arrive unvalidated; each service decides how a malformed id is reported.

/// Command: add a book to the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_copies: i64,
}

/// Command: lend a copy to a patron
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowBook {
    pub patron_id: String,
    pub book_id: BookId,
    pub borrowed_at: DateTime<Utc>,
}

/// Command: take a copy back from a patron
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBook {
    pub patron_id: String,
    pub book_id: BookId,
    pub returned_at: DateTime<Utc>,
}

/// Command: charge the late fee of one borrow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayLateFees {
    pub patron_id: String,
    pub book_id: BookId,
    pub as_of: DateTime<Utc>,
}

/// Command: refund a late fee payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundLateFee {
    pub transaction_id: String,
    pub amount: Money,
}
