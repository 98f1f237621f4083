use crate::domain::{Book, BookId, book, commands::AddBook};
use std::str::FromStr;

use super::errors::{CatalogError, Result};
use crate::application::ServiceDependencies;

/// Field a catalog search matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Case-insensitive substring of the title
    Title,
    /// Case-insensitive substring of the author
    Author,
    /// Exact ISBN
    Isbn,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Title => "title",
            SearchType::Author => "author",
            SearchType::Isbn => "isbn",
        }
    }

    fn matches(&self, book: &Book, term: &str, term_lower: &str) -> bool {
        match self {
            SearchType::Title => book.title.to_lowercase().contains(term_lower),
            SearchType::Author => book.author.to_lowercase().contains(term_lower),
            SearchType::Isbn => book.isbn == term,
        }
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "title" => Ok(SearchType::Title),
            "author" => Ok(SearchType::Author),
            "isbn" => Ok(SearchType::Isbn),
            _ => Err(format!("Invalid search type: {}", s)),
        }
    }
}

/// A book that made it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookAdded {
    pub book_id: BookId,
    /// Trimmed title as stored
    pub title: String,
}

impl BookAdded {
    pub fn message(&self) -> String {
        format!(
            "Book \"{}\" has been successfully added to the catalog.",
            self.title
        )
    }
}

/// Add a book to the catalog
///
/// Business rules:
/// - title 1..=200 characters and author 1..=100 characters, after trimming
/// - ISBN exactly 13 characters and not already in the catalog
/// - at least one copy; all copies start on the shelf
///
/// # Errors
/// - a validation variant for the first rule broken, checked in the order above
/// - DuplicateIsbn: the ISBN is already catalogued
/// - InsertFailed: the store rejected the insert
/// - RepositoryError: the ISBN lookup failed
pub async fn add_book(deps: &ServiceDependencies, cmd: AddBook) -> Result<BookAdded> {
    let new_book = book::validate_new_book(&cmd.title, &cmd.author, &cmd.isbn, cmd.total_copies)?;

    let existing = deps
        .books
        .get_by_isbn(&new_book.isbn)
        .await
        .map_err(CatalogError::RepositoryError)?;

    if existing.is_some() {
        return Err(CatalogError::DuplicateIsbn);
    }

    let title = new_book.title.clone();
    let book_id = deps
        .books
        .insert(new_book)
        .await
        .map_err(CatalogError::InsertFailed)?;

    tracing::info!(book_id = %book_id, title = %title, "book added to catalog");

    Ok(BookAdded { book_id, title })
}

/// Search the catalog
///
/// A blank term matches nothing. Results keep catalog order.
pub async fn search_books(
    deps: &ServiceDependencies,
    term: &str,
    search_type: SearchType,
) -> Result<Vec<Book>> {
    let term = term.trim();
    if term.is_empty() {
        return Ok(Vec::new());
    }

    let term_lower = term.to_lowercase();
    let books = list_catalog(deps).await?;

    Ok(books
        .into_iter()
        .filter(|book| search_type.matches(book, term, &term_lower))
        .collect())
}

/// Every book in catalog order.
pub async fn list_catalog(deps: &ServiceDependencies) -> Result<Vec<Book>> {
    deps.books
        .list_all()
        .await
        .map_err(CatalogError::RepositoryError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_type_from_str() {
        assert_eq!("title".parse::<SearchType>(), Ok(SearchType::Title));
        assert_eq!("author".parse::<SearchType>(), Ok(SearchType::Author));
        assert_eq!("isbn".parse::<SearchType>(), Ok(SearchType::Isbn));
        assert!("publisher".parse::<SearchType>().is_err());
        assert!("Title".parse::<SearchType>().is_err());
    }

    #[test]
    fn test_book_added_message_echoes_title() {
        let added = BookAdded {
            book_id: BookId::new(4),
            title: "Dune".to_string(),
        };
        assert_eq!(
            added.message(),
            "Book \"Dune\" has been successfully added to the catalog."
        );
    }
}
