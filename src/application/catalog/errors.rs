use crate::domain::BookValidationError;
use thiserror::Error;

/// Catalog errors
///
/// The display strings are shown to librarians as-is.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Title is required.")]
    TitleRequired,

    #[error("Title must be less than 200 characters.")]
    TitleTooLong,

    #[error("Author is required.")]
    AuthorRequired,

    #[error("Author must be less than 100 characters.")]
    AuthorTooLong,

    #[error("ISBN must be exactly 13 digits.")]
    InvalidIsbn,

    #[error("Total copies must be a positive integer.")]
    InvalidTotalCopies,

    #[error("A book with this ISBN already exists.")]
    DuplicateIsbn,

    /// Insert into the book store failed
    #[error("Database error occurred while adding the book.")]
    InsertFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Reading the book store failed
    #[error("Database error occurred while reading the catalog.")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<BookValidationError> for CatalogError {
    fn from(err: BookValidationError) -> Self {
        match err {
            BookValidationError::TitleRequired => CatalogError::TitleRequired,
            BookValidationError::TitleTooLong => CatalogError::TitleTooLong,
            BookValidationError::AuthorRequired => CatalogError::AuthorRequired,
            BookValidationError::AuthorTooLong => CatalogError::AuthorTooLong,
            BookValidationError::InvalidIsbn => CatalogError::InvalidIsbn,
            BookValidationError::InvalidTotalCopies => CatalogError::InvalidTotalCopies,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
