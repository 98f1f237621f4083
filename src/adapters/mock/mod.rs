pub mod book_repository;
pub mod borrow_record_repository;
pub mod payment_gateway;

pub use book_repository::BookRepository;
pub use borrow_record_repository::BorrowRecordRepository;
pub use payment_gateway::{GatewayBehavior, PaymentGateway};
