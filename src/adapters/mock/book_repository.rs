use crate::domain::{Book, BookId, NewBook};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory implementation of BookRepository
///
/// Keeps books in insertion order and assigns ids from 1. Every operation
/// holds the lock for its whole read-modify-write, which makes
/// `decrement_if_available` atomic. Writes can be made to fail for testing.
pub struct BookRepository {
    books: Mutex<Vec<Book>>,
    fail_inserts: AtomicBool,
    fail_availability_updates: AtomicBool,
}

impl BookRepository {
    pub fn new() -> Self {
        Self {
            books: Mutex::new(Vec::new()),
            fail_inserts: AtomicBool::new(false),
            fail_availability_updates: AtomicBool::new(false),
        }
    }

    /// Make every subsequent insert return an error
    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent availability change return an error
    pub fn set_fail_availability_updates(&self, fail: bool) {
        self.fail_availability_updates.store(fail, Ordering::SeqCst);
    }

    /// Store a book with an explicit availability, bypassing catalog rules
    pub fn seed(&self, title: &str, author: &str, isbn: &str, total: i32, available: i32) -> BookId {
        let mut books = self.books.lock().unwrap();
        let id = BookId::new(books.len() as i64 + 1);
        books.push(Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            total_copies: total,
            available_copies: available,
        });
        id
    }
}

impl Default for BookRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn get_by_id(&self, book_id: BookId) -> Result<Option<Book>> {
        let books = self.books.lock().unwrap();
        Ok(books.iter().find(|b| b.id == book_id).cloned())
    }

    async fn get_by_isbn(&self, isbn: &str) -> Result<Option<Book>> {
        let books = self.books.lock().unwrap();
        Ok(books.iter().find(|b| b.isbn == isbn).cloned())
    }

    async fn insert(&self, book: NewBook) -> Result<BookId> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err("book insert failed".into());
        }
        let available = book.available_copies();
        Ok(self.seed(&book.title, &book.author, &book.isbn, book.total_copies, available))
    }

    async fn update_availability(&self, book_id: BookId, delta: i32) -> Result<bool> {
        if self.fail_availability_updates.load(Ordering::SeqCst) {
            return Err("availability update failed".into());
        }
        let mut books = self.books.lock().unwrap();
        let Some(book) = books.iter_mut().find(|b| b.id == book_id) else {
            return Ok(false);
        };
        let updated = book.available_copies + delta;
        if !(0..=book.total_copies).contains(&updated) {
            return Ok(false);
        }
        book.available_copies = updated;
        Ok(true)
    }

    async fn decrement_if_available(&self, book_id: BookId) -> Result<bool> {
        if self.fail_availability_updates.load(Ordering::SeqCst) {
            return Err("availability update failed".into());
        }
        let mut books = self.books.lock().unwrap();
        match books.iter_mut().find(|b| b.id == book_id) {
            Some(book) if book.available_copies > 0 => {
                book.available_copies -= 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_all(&self) -> Result<Vec<Book>> {
        Ok(self.books.lock().unwrap().clone())
    }
}
