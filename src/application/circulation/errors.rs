use thiserror::Error;

/// Borrowing and return errors
#[derive(Debug, Error)]
pub enum CirculationError {
    #[error("Invalid patron ID. Must be exactly 6 digits.")]
    InvalidPatronId,

    #[error("Invalid patron ID or book ID.")]
    InvalidPatronOrBook,

    #[error("Book not found.")]
    BookNotFound,

    /// No copy left on the shelf
    #[error("This book is currently not available.")]
    BookUnavailable,

    #[error("You have reached the maximum borrowing limit of 5 books.")]
    BorrowLimitReached,

    #[error("No active borrow record found for this patron and book.")]
    NoActiveBorrow,

    /// Writing the borrow record failed
    #[error("Database error occurred while creating borrow record.")]
    RecordInsertFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Changing the available copies failed or was refused
    #[error("Database error occurred while updating book availability.")]
    AvailabilityUpdateFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Setting the return date failed or found no active record
    #[error("Database error occurred while recording the return date.")]
    ReturnDateUpdateFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A read needed for validation failed
    #[error("Database error occurred while reading library records.")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, CirculationError>;
