use crate::domain::{BookId, BorrowRecord, PatronId};
use crate::ports::borrow_record_repository::{
    BorrowRecordRepository as BorrowRecordRepositoryTrait, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory implementation of BorrowRecordRepository
///
/// Records are kept in insertion order. Writes can be made to fail for
/// testing.
pub struct BorrowRecordRepository {
    records: Mutex<Vec<BorrowRecord>>,
    fail_inserts: AtomicBool,
    fail_mark_returned: AtomicBool,
}

impl BorrowRecordRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_inserts: AtomicBool::new(false),
            fail_mark_returned: AtomicBool::new(false),
        }
    }

    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_mark_returned(&self, fail: bool) {
        self.fail_mark_returned.store(fail, Ordering::SeqCst);
    }

    /// Store a record as-is, e.g. one borrowed weeks ago
    pub fn seed(&self, record: BorrowRecord) {
        self.records.lock().unwrap().push(record);
    }

    /// Snapshot of every stored record
    pub fn all(&self) -> Vec<BorrowRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for BorrowRecordRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BorrowRecordRepositoryTrait for BorrowRecordRepository {
    async fn insert(&self, record: BorrowRecord) -> Result<()> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err("borrow record insert failed".into());
        }
        self.seed(record);
        Ok(())
    }

    async fn mark_returned(
        &self,
        patron_id: &PatronId,
        book_id: BookId,
        returned_at: DateTime<Utc>,
    ) -> Result<bool> {
        if self.fail_mark_returned.load(Ordering::SeqCst) {
            return Err("return date update failed".into());
        }
        let mut records = self.records.lock().unwrap();
        match records
            .iter_mut()
            .find(|r| r.is_active_for(patron_id, book_id))
        {
            Some(record) => {
                record.returned_at = Some(returned_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_patron(&self, patron_id: &PatronId) -> Result<Vec<BorrowRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| &r.patron_id == patron_id)
            .cloned()
            .collect())
    }

    async fn find_active(
        &self,
        patron_id: &PatronId,
        book_id: BookId,
    ) -> Result<Option<BorrowRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .find(|r| r.is_active_for(patron_id, book_id))
            .cloned())
    }

    async fn count_active_for_patron(&self, patron_id: &PatronId) -> Result<usize> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| &r.patron_id == patron_id && r.is_active())
            .count())
    }
}
