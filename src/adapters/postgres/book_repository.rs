use crate::domain::{Book, BookId, NewBook};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

fn map_row_to_book(row: &PgRow) -> Book {
    Book {
        id: BookId::new(row.get("id")),
        title: row.get("title"),
        author: row.get("author"),
        isbn: row.get("isbn"),
        total_copies: row.get("total_copies"),
        available_copies: row.get("available_copies"),
    }
}

/// PostgreSQL implementation of BookRepository
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn get_by_id(&self, book_id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, author, isbn, total_copies, available_copies
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(book_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_row_to_book))
    }

    async fn get_by_isbn(&self, isbn: &str) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, author, isbn, total_copies, available_copies
            FROM books
            WHERE isbn = $1
            "#,
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_row_to_book))
    }

    async fn insert(&self, book: NewBook) -> Result<BookId> {
        let row = sqlx::query(
            r#"
            INSERT INTO books (title, author, isbn, total_copies, available_copies)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.total_copies)
        .bind(book.available_copies())
        .fetch_one(&self.pool)
        .await?;

        Ok(BookId::new(row.get("id")))
    }

    /// The range check is part of the UPDATE so no row changes when it fails.
    async fn update_availability(&self, book_id: BookId, delta: i32) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET available_copies = available_copies + $2
            WHERE id = $1
              AND available_copies + $2 BETWEEN 0 AND total_copies
            "#,
        )
        .bind(book_id.value())
        .bind(delta)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Single conditional UPDATE; the row lock serializes concurrent borrowers.
    async fn decrement_if_available(&self, book_id: BookId) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET available_copies = available_copies - 1
            WHERE id = $1 AND available_copies > 0
            "#,
        )
        .bind(book_id.value())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_all(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, author, isbn, total_copies, available_copies
            FROM books
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row_to_book).collect())
    }
}
