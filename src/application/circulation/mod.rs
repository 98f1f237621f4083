mod circulation_service;
mod errors;

pub use circulation_service::{
    BorrowReceipt, MAX_ACTIVE_BORROWS, RETURN_CONFIRMATION, borrow_book, return_book,
};
pub use errors::{CirculationError, Result};
