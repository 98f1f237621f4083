pub mod book_repository;
pub mod borrow_record_repository;

pub use book_repository::BookRepository as PostgresBookRepository;
pub use borrow_record_repository::BorrowRecordRepository as PostgresBorrowRecordRepository;

/// Apply the schema in `migrations/`.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
