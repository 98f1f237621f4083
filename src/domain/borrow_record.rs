use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, PatronId};

/// Loan period in days.
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// One borrowing of one copy by one patron.
///
/// `returned_at == None` means the copy is still out. The lending rules assume
/// at most one active record per (patron, book) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowRecord {
    pub patron_id: PatronId,
    pub book_id: BookId,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl BorrowRecord {
    pub fn is_active(&self) -> bool {
        self.returned_at.is_none()
    }

    /// Whether this is the active record for the given pair.
    pub fn is_active_for(&self, patron_id: &PatronId, book_id: BookId) -> bool {
        self.is_active() && &self.patron_id == patron_id && self.book_id == book_id
    }
}

/// Pure function: open a borrow record.
///
/// The due date is `borrowed_at` plus the loan period.
pub fn open_borrow_record(
    patron_id: PatronId,
    book_id: BookId,
    borrowed_at: DateTime<Utc>,
) -> BorrowRecord {
    BorrowRecord {
        patron_id,
        book_id,
        borrowed_at,
        due_date: due_date_for(borrowed_at),
        returned_at: None,
    }
}

pub fn due_date_for(borrowed_at: DateTime<Utc>) -> DateTime<Utc> {
    borrowed_at + Duration::days(LOAN_PERIOD_DAYS)
}
