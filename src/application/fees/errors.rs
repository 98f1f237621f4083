use thiserror::Error;

/// Late fee errors
#[derive(Debug, Error)]
pub enum FeeError {
    #[error("Invalid patron ID. Must be exactly 6 digits.")]
    InvalidPatronId,

    /// Fee calculation did not end in `success`
    #[error("Unable to calculate late fees.")]
    UnableToCalculate,

    #[error("No late fees to pay for this book.")]
    NoLateFees,

    #[error("Book not found.")]
    BookNotFound,

    /// Gateway answered and declined the charge
    #[error("Payment failed: {0}")]
    PaymentDeclined(String),

    /// Gateway faulted or did not answer in time
    #[error("Payment processing error: {0}")]
    PaymentProcessing(String),

    #[error("Invalid transaction ID.")]
    InvalidTransactionId,

    #[error("Refund amount must be greater than 0.")]
    InvalidRefundAmount,

    #[error("Refund amount exceeds maximum late fee.")]
    RefundExceedsMaximum,

    /// Gateway refused the refund; its message is passed through unchanged
    #[error("{0}")]
    RefundRejected(String),

    #[error("Refund processing error: {0}")]
    RefundProcessing(String),

    /// Reading borrow records or books failed
    #[error("Database error occurred while calculating late fees.")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, FeeError>;
