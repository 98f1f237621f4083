use crate::application::{ServiceDependencies, fees};
use crate::domain::{BorrowRecord, Money, PatronId};
use chrono::{DateTime, Utc};

use super::errors::{ReportingError, Result};

/// Patron status report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatronStatusReport {
    /// Echoed as given, even when malformed
    pub patron_id: String,
    /// Active and historical records
    pub borrowed_books: Vec<BorrowRecord>,
    pub total_late_fees: Money,
    /// Books currently held
    pub borrow_count: usize,
}

impl PatronStatusReport {
    fn empty(patron_id: &str) -> Self {
        Self {
            patron_id: patron_id.to_string(),
            borrowed_books: Vec::new(),
            total_late_fees: Money::ZERO,
            borrow_count: 0,
        }
    }
}

/// Build the status report of a patron
///
/// A malformed patron id yields an empty report instead of an error.
/// The fee total is the sum of the late fee calculated for the book of each
/// record, counting every calculation that succeeds.
///
/// # Errors
/// - RepositoryError: listing the patron's records failed
/// - FeeCalculation: a fee lookup failed
pub async fn get_patron_status_report(
    deps: &ServiceDependencies,
    patron_id: &str,
    as_of: DateTime<Utc>,
) -> Result<PatronStatusReport> {
    let Ok(patron) = PatronId::parse(patron_id) else {
        return Ok(PatronStatusReport::empty(patron_id));
    };

    let records = deps
        .borrow_records
        .find_by_patron(&patron)
        .await
        .map_err(ReportingError::RepositoryError)?;

    let mut total_late_fees = Money::ZERO;
    for record in &records {
        let fee = fees::calculate_late_fee(deps, patron.as_str(), record.book_id, as_of)
            .await
            .map_err(ReportingError::FeeCalculation)?;
        if fee.is_success() {
            total_late_fees += fee.fee_amount;
        }
    }

    let borrow_count = deps
        .borrow_records
        .count_active_for_patron(&patron)
        .await
        .map_err(ReportingError::RepositoryError)?;

    Ok(PatronStatusReport {
        patron_id: patron_id.to_string(),
        borrowed_books: records,
        total_late_fees,
        borrow_count,
    })
}
