use crate::ports::{BookRepository, BorrowRecordRepository};
use std::sync::Arc;
use std::time::Duration;

/// Default bound on a single payment collaborator call.
pub const DEFAULT_COLLABORATOR_TIMEOUT: Duration = Duration::from_secs(10);

/// Service dependencies
///
/// Services are plain async functions; everything they touch is passed in
/// through this struct so they can run against in-memory adapters in tests.
/// The payment gateway is not part of it: only the fee operations use it and
/// they take it as an argument.
#[derive(Clone)]
pub struct ServiceDependencies {
    pub books: Arc<dyn BookRepository>,
    pub borrow_records: Arc<dyn BorrowRecordRepository>,
    /// Upper bound on one payment gateway call
    pub collaborator_timeout: Duration,
}

impl ServiceDependencies {
    pub fn new(
        books: Arc<dyn BookRepository>,
        borrow_records: Arc<dyn BorrowRecordRepository>,
    ) -> Self {
        Self {
            books,
            borrow_records,
            collaborator_timeout: DEFAULT_COLLABORATOR_TIMEOUT,
        }
    }

    pub fn with_collaborator_timeout(mut self, timeout: Duration) -> Self {
        self.collaborator_timeout = timeout;
        self
    }
}
