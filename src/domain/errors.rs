/// Reasons a catalog entry is rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    TitleRequired,
    TitleTooLong,
    AuthorRequired,
    AuthorTooLong,
    /// ISBN is not exactly 13 characters
    InvalidIsbn,
    /// Zero or negative number of copies
    InvalidTotalCopies,
}
