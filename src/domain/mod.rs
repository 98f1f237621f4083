pub mod book;
pub mod borrow_record;
pub mod commands;
pub mod errors;
pub mod late_fee;
pub mod money;
pub mod value_objects;

pub use book::{Book, NewBook};
pub use borrow_record::BorrowRecord;
pub use errors::*;
pub use late_fee::{LateFeeResult, LateFeeStatus};
pub use money::Money;
pub use value_objects::*;
