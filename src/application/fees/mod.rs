mod errors;
mod fee_service;

pub use errors::{FeeError, Result};
pub use fee_service::{PaymentReceipt, calculate_late_fee, pay_late_fees, refund_late_fee_payment};
