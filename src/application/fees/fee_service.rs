use crate::domain::{
    BookId, LateFeeResult, Money, PatronId,
    commands::{PayLateFees, RefundLateFee},
    late_fee::{self, MAX_LATE_FEE},
};
use crate::ports::PaymentGateway;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;

use super::errors::{FeeError, Result};
use crate::application::ServiceDependencies;

/// A settled late fee charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub transaction_id: String,
    pub amount: Money,
    pub message: String,
}

/// Calculate the late fee of one borrow
///
/// - both ids malformed: `invalid-input`, zero fee
/// - no record without a return date for the pair: `no-active-record`, zero fee
/// - otherwise 0.50 per whole day past the due date, capped at 15.00
///
/// A malformed patron id alone cannot own any record, so it ends in
/// `no-active-record` without touching the store.
///
/// # Errors
/// - RepositoryError: reading the borrow records failed
pub async fn calculate_late_fee(
    deps: &ServiceDependencies,
    patron_id: &str,
    book_id: BookId,
    as_of: DateTime<Utc>,
) -> Result<LateFeeResult> {
    let patron_id = match (PatronId::parse(patron_id), book_id.is_well_formed()) {
        (Ok(patron_id), _) => patron_id,
        (Err(_), false) => return Ok(LateFeeResult::invalid_input()),
        (Err(_), true) => return Ok(LateFeeResult::no_active_record()),
    };

    let active = deps
        .borrow_records
        .find_active(&patron_id, book_id)
        .await
        .map_err(FeeError::RepositoryError)?;

    Ok(match active {
        Some(record) => late_fee::assess_late_fee(record.due_date, as_of),
        None => LateFeeResult::no_active_record(),
    })
}

/// Charge the late fee of one borrow through the payment gateway
///
/// The gateway is only contacted when the patron id is valid and a
/// non-zero fee was calculated.
///
/// # Arguments
/// * `gateway` - charges the fee; each call is bounded by `deps.collaborator_timeout`
/// * `cmd` - patron, book and the instant the fee is assessed at
///
/// # Errors
/// - InvalidPatronId: patron id is not six digits
/// - UnableToCalculate: no active record for the pair
/// - NoLateFees: the fee is zero
/// - BookNotFound: the record's book is gone
/// - PaymentDeclined: the gateway answered and declined
/// - PaymentProcessing: the gateway faulted, timed out or approved without a transaction id
/// - RepositoryError: reading records or the book failed
pub async fn pay_late_fees(
    deps: &ServiceDependencies,
    gateway: &dyn PaymentGateway,
    cmd: PayLateFees,
) -> Result<PaymentReceipt> {
    let patron_id = PatronId::parse(&cmd.patron_id).map_err(|_| FeeError::InvalidPatronId)?;

    let fee = calculate_late_fee(deps, patron_id.as_str(), cmd.book_id, cmd.as_of).await?;
    if !fee.is_success() {
        return Err(FeeError::UnableToCalculate);
    }
    if fee.fee_amount.is_zero() {
        return Err(FeeError::NoLateFees);
    }

    let book = deps
        .books
        .get_by_id(cmd.book_id)
        .await
        .map_err(FeeError::RepositoryError)?
        .ok_or(FeeError::BookNotFound)?;

    let description = format!("Late fees for '{}'", book.title);

    let outcome = bounded(
        deps.collaborator_timeout,
        gateway.process_payment(&patron_id, fee.fee_amount, &description),
    )
    .await
    .map_err(FeeError::PaymentProcessing)?;

    if !outcome.success {
        tracing::warn!(
            patron_id = %patron_id,
            book_id = %cmd.book_id,
            reason = %outcome.message,
            "late fee payment declined"
        );
        return Err(FeeError::PaymentDeclined(outcome.message));
    }

    let transaction_id = outcome.transaction_id.ok_or_else(|| {
        FeeError::PaymentProcessing("gateway approved without a transaction id".to_string())
    })?;

    tracing::info!(
        patron_id = %patron_id,
        book_id = %cmd.book_id,
        amount = %fee.fee_amount,
        transaction_id = %transaction_id,
        "late fee paid"
    );

    Ok(PaymentReceipt {
        transaction_id,
        amount: fee.fee_amount,
        message: format!("Payment successful! {}", outcome.message),
    })
}

/// Refund a late fee payment
///
/// The amount must be positive and no larger than the largest possible late
/// fee. The gateway's message is returned unchanged either way.
///
/// # Errors
/// - InvalidTransactionId: blank transaction id
/// - InvalidRefundAmount / RefundExceedsMaximum: amount outside `(0, 15.00]`
/// - RefundRejected: the gateway refused; carries its message
/// - RefundProcessing: the gateway faulted or timed out
pub async fn refund_late_fee_payment(
    deps: &ServiceDependencies,
    gateway: &dyn PaymentGateway,
    cmd: RefundLateFee,
) -> Result<String> {
    let transaction_id = cmd.transaction_id.trim();
    if transaction_id.is_empty() {
        return Err(FeeError::InvalidTransactionId);
    }
    if !cmd.amount.is_positive() {
        return Err(FeeError::InvalidRefundAmount);
    }
    if cmd.amount > MAX_LATE_FEE {
        return Err(FeeError::RefundExceedsMaximum);
    }

    let outcome = bounded(
        deps.collaborator_timeout,
        gateway.refund_payment(transaction_id, cmd.amount),
    )
    .await
    .map_err(FeeError::RefundProcessing)?;

    if outcome.success {
        tracing::info!(transaction_id, amount = %cmd.amount, "late fee refunded");
        Ok(outcome.message)
    } else {
        tracing::warn!(transaction_id, reason = %outcome.message, "refund rejected");
        Err(FeeError::RefundRejected(outcome.message))
    }
}

/// Await a gateway call for at most `limit`, folding a fault or a timeout
/// into its message.
async fn bounded<T, F>(limit: Duration, call: F) -> std::result::Result<T, String>
where
    F: Future<Output = crate::ports::payment_gateway::Result<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "payment gateway call failed");
            Err(e.to_string())
        }
        Err(_) => {
            tracing::error!(timeout_ms = limit.as_millis() as u64, "payment gateway timed out");
            Err(format!(
                "payment gateway did not respond within {} ms",
                limit.as_millis()
            ))
        }
    }
}
