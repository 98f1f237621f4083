use crate::domain::{BookId, BorrowRecord, PatronId};
use crate::ports::borrow_record_repository::{
    BorrowRecordRepository as BorrowRecordRepositoryTrait, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};

/// Convert a row into a BorrowRecord
///
/// The patron id column is re-validated; a malformed value is reported as
/// invalid data rather than smuggled into the domain.
fn map_row_to_borrow_record(row: &PgRow) -> Result<BorrowRecord> {
    let patron_id_str: &str = row.get("patron_id");
    let patron_id = PatronId::parse(patron_id_str).map_err(|_| {
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("invalid patron_id in borrow_records: {}", patron_id_str),
        )) as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(BorrowRecord {
        patron_id,
        book_id: BookId::new(row.get("book_id")),
        borrowed_at: row.get("borrowed_at"),
        due_date: row.get("due_date"),
        returned_at: row.get("returned_at"),
    })
}

/// PostgreSQL implementation of BorrowRecordRepository
pub struct BorrowRecordRepository {
    pool: PgPool,
}

impl BorrowRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BorrowRecordRepositoryTrait for BorrowRecordRepository {
    async fn insert(&self, record: BorrowRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO borrow_records (patron_id, book_id, borrowed_at, due_date, returned_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.patron_id.as_str())
        .bind(record.book_id.value())
        .bind(record.borrowed_at)
        .bind(record.due_date)
        .bind(record.returned_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn mark_returned(
        &self,
        patron_id: &PatronId,
        book_id: BookId,
        returned_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE borrow_records
            SET returned_at = $3
            WHERE id = (
                SELECT id FROM borrow_records
                WHERE patron_id = $1 AND book_id = $2 AND returned_at IS NULL
                ORDER BY borrowed_at ASC
                LIMIT 1
            )
            "#,
        )
        .bind(patron_id.as_str())
        .bind(book_id.value())
        .bind(returned_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_by_patron(&self, patron_id: &PatronId) -> Result<Vec<BorrowRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT patron_id, book_id, borrowed_at, due_date, returned_at
            FROM borrow_records
            WHERE patron_id = $1
            ORDER BY borrowed_at ASC, id ASC
            "#,
        )
        .bind(patron_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_borrow_record).collect()
    }

    async fn find_active(
        &self,
        patron_id: &PatronId,
        book_id: BookId,
    ) -> Result<Option<BorrowRecord>> {
        let row = sqlx::query(
            r#"
            SELECT patron_id, book_id, borrowed_at, due_date, returned_at
            FROM borrow_records
            WHERE patron_id = $1 AND book_id = $2 AND returned_at IS NULL
            ORDER BY borrowed_at ASC
            LIMIT 1
            "#,
        )
        .bind(patron_id.as_str())
        .bind(book_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_borrow_record).transpose()
    }

    async fn count_active_for_patron(&self, patron_id: &PatronId) -> Result<usize> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS active_count
            FROM borrow_records
            WHERE patron_id = $1 AND returned_at IS NULL
            "#,
        )
        .bind(patron_id.as_str())
        .fetch_one(&self.pool)
        .await?;

        let count: i64 = row.get("active_count");
        Ok(usize::try_from(count)?)
    }
}
