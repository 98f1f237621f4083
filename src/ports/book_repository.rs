use crate::domain::{Book, BookId, NewBook};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Book storage port
///
/// Catalog order is insertion order (ascending id).
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn get_by_id(&self, book_id: BookId) -> Result<Option<Book>>;

    async fn get_by_isbn(&self, isbn: &str) -> Result<Option<Book>>;

    /// Insert a new catalog entry with `available_copies == total_copies`.
    async fn insert(&self, book: NewBook) -> Result<BookId>;

    /// Apply a signed change to the available copies.
    ///
    /// Returns `false` when the book does not exist or the change would leave
    /// availability outside `0..=total_copies`; nothing is written then.
    async fn update_availability(&self, book_id: BookId, delta: i32) -> Result<bool>;

    /// Take one copy off the shelf if any is left.
    ///
    /// Check and decrement happen as one atomic step, so two borrowers can
    /// never both take the last copy. Returns `false` if no copy was taken.
    async fn decrement_if_available(&self, book_id: BookId) -> Result<bool>;

    async fn list_all(&self) -> Result<Vec<Book>>;
}
