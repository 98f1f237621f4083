use crate::domain::{BookId, BorrowRecord, PatronId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Borrow record storage port
///
/// Patron aggregates (borrowed books, borrow count) are derived from here;
/// there is no separate patron store.
#[async_trait]
pub trait BorrowRecordRepository: Send + Sync {
    async fn insert(&self, record: BorrowRecord) -> Result<()>;

    /// Set the return date on the active record of the pair.
    ///
    /// Returns `false` when the pair has no active record.
    async fn mark_returned(
        &self,
        patron_id: &PatronId,
        book_id: BookId,
        returned_at: DateTime<Utc>,
    ) -> Result<bool>;

    /// All records of the patron, active and historical, oldest first.
    async fn find_by_patron(&self, patron_id: &PatronId) -> Result<Vec<BorrowRecord>>;

    /// The record with no return date for the pair, if any.
    async fn find_active(
        &self,
        patron_id: &PatronId,
        book_id: BookId,
    ) -> Result<Option<BorrowRecord>>;

    /// Number of books the patron currently holds.
    async fn count_active_for_patron(&self, patron_id: &PatronId) -> Result<usize>;
}
