use serde::{Deserialize, Serialize};

use super::{BookId, BookValidationError};

/// Longest accepted title, counted in characters after trimming.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Longest accepted author name, counted in characters after trimming.
pub const MAX_AUTHOR_LENGTH: usize = 100;

pub const ISBN_LENGTH: usize = 13;

/// A catalog entry.
///
/// Invariant: `0 <= available_copies <= total_copies`. Only availability
/// changes after insertion, one copy at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_copies: i32,
    pub available_copies: i32,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }
}

/// A validated book that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_copies: i32,
}

impl NewBook {
    /// Copies on the shelf when the book first enters the catalog.
    pub fn available_copies(&self) -> i32 {
        self.total_copies
    }
}

/// Pure function: validate catalog input.
///
/// Title and author are trimmed before the length checks and are stored
/// trimmed. The ISBN is checked for length only and kept as given.
/// Checks run in field order and the first failure wins.
pub fn validate_new_book(
    title: &str,
    author: &str,
    isbn: &str,
    total_copies: i64,
) -> Result<NewBook, BookValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(BookValidationError::TitleRequired);
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(BookValidationError::TitleTooLong);
    }

    let author = author.trim();
    if author.is_empty() {
        return Err(BookValidationError::AuthorRequired);
    }
    if author.chars().count() > MAX_AUTHOR_LENGTH {
        return Err(BookValidationError::AuthorTooLong);
    }

    if isbn.chars().count() != ISBN_LENGTH {
        return Err(BookValidationError::InvalidIsbn);
    }

    let total_copies = i32::try_from(total_copies)
        .ok()
        .filter(|copies| *copies > 0)
        .ok_or(BookValidationError::InvalidTotalCopies)?;

    Ok(NewBook {
        title: title.to_string(),
        author: author.to_string(),
        isbn: isbn.to_string(),
        total_copies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_new_book_success_trims_fields() {
        let book = validate_new_book("  Dune  ", " Frank Herbert ", "9780441013593", 3).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.isbn, "9780441013593");
        assert_eq!(book.total_copies, 3);
        assert_eq!(book.available_copies(), 3);
    }

    #[test]
    fn test_validate_new_book_title_required() {
        assert_eq!(
            validate_new_book("   ", "Author", "1234567890123", 1),
            Err(BookValidationError::TitleRequired)
        );
    }

    #[test]
    fn test_validate_new_book_title_length_boundary() {
        let at_limit = "a".repeat(MAX_TITLE_LENGTH);
        assert!(validate_new_book(&at_limit, "Author", "1234567890123", 1).is_ok());

        let over_limit = "a".repeat(MAX_TITLE_LENGTH + 1);
        assert_eq!(
            validate_new_book(&over_limit, "Author", "1234567890123", 1),
            Err(BookValidationError::TitleTooLong)
        );
    }

    #[test]
    fn test_validate_new_book_title_whitespace_not_counted() {
        let padded = format!("  {}  ", "a".repeat(MAX_TITLE_LENGTH));
        assert!(validate_new_book(&padded, "Author", "1234567890123", 1).is_ok());
    }

    #[test]
    fn test_validate_new_book_author_rules() {
        assert_eq!(
            validate_new_book("Title", "", "1234567890123", 1),
            Err(BookValidationError::AuthorRequired)
        );
        let over_limit = "b".repeat(MAX_AUTHOR_LENGTH + 1);
        assert_eq!(
            validate_new_book("Title", &over_limit, "1234567890123", 1),
            Err(BookValidationError::AuthorTooLong)
        );
    }

    #[test]
    fn test_validate_new_book_isbn_length() {
        for isbn in ["", "123456789012", "12345678901234"] {
            assert_eq!(
                validate_new_book("Title", "Author", isbn, 1),
                Err(BookValidationError::InvalidIsbn),
                "isbn {:?}",
                isbn
            );
        }
    }

    #[test]
    fn test_validate_new_book_total_copies() {
        for copies in [0, -1, i64::from(i32::MAX) + 1] {
            assert_eq!(
                validate_new_book("Title", "Author", "1234567890123", copies),
                Err(BookValidationError::InvalidTotalCopies)
            );
        }
    }

    #[test]
    fn test_validate_new_book_reports_first_failure() {
        // both title and isbn are bad, title is checked first
        assert_eq!(
            validate_new_book("", "Author", "1", 0),
            Err(BookValidationError::TitleRequired)
        );
    }
}
