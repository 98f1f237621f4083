use crate::application::{ServiceDependencies, fees};
use crate::domain::{
    BorrowRecord, PatronId, borrow_record,
    commands::{BorrowBook, ReturnBook},
};

use super::errors::{CirculationError, Result};

/// Active borrows a patron may hold before further borrowing is refused.
///
/// The check is `count > MAX_ACTIVE_BORROWS`, evaluated before the new
/// record exists, so a patron holding five books can still take a sixth.
pub const MAX_ACTIVE_BORROWS: usize = 5;

pub const RETURN_CONFIRMATION: &str = "Book returned successfully.";

/// A completed loan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowReceipt {
    pub record: BorrowRecord,
    pub title: String,
}

impl BorrowReceipt {
    pub fn message(&self) -> String {
        format!(
            "Successfully borrowed \"{}\". Due date: {}.",
            self.title,
            self.record.due_date.format("%Y-%m-%d")
        )
    }
}

/// Lend a copy to a patron
///
/// Business rules:
/// - patron id is six digits
/// - the book exists and has a copy on the shelf
/// - the patron does not already hold more than five books
///
/// The copy is taken with a conditional decrement before the record is
/// written, so concurrent borrowers cannot both get the last copy. If the
/// record insert then fails the copy is put back.
///
/// # Returns
/// The new record and the book title; `BorrowReceipt::message` is the
/// confirmation shown to the patron.
///
/// # Errors
/// - InvalidPatronId: patron id is not six digits
/// - BookNotFound: no book with this id
/// - BookUnavailable: no copy on the shelf, including a lost race for the last one
/// - BorrowLimitReached: patron holds more than five books
/// - AvailabilityUpdateFailed: the decrement failed in the store
/// - RecordInsertFailed: the record could not be written (copy restored)
/// - RepositoryError: reading the book or the patron's records failed
pub async fn borrow_book(deps: &ServiceDependencies, cmd: BorrowBook) -> Result<BorrowReceipt> {
    // 1. patron id
    let patron_id =
        PatronId::parse(&cmd.patron_id).map_err(|_| CirculationError::InvalidPatronId)?;

    // 2. book exists and is on the shelf
    let book = deps
        .books
        .get_by_id(cmd.book_id)
        .await
        .map_err(CirculationError::RepositoryError)?
        .ok_or(CirculationError::BookNotFound)?;

    if !book.is_available() {
        return Err(CirculationError::BookUnavailable);
    }

    // 3. borrowing limit
    let active_borrows = deps
        .borrow_records
        .count_active_for_patron(&patron_id)
        .await
        .map_err(CirculationError::RepositoryError)?;

    if active_borrows > MAX_ACTIVE_BORROWS {
        return Err(CirculationError::BorrowLimitReached);
    }

    // 4. take the copy; losing a race for the last one reads as unavailable
    let taken = deps
        .books
        .decrement_if_available(book.id)
        .await
        .map_err(CirculationError::AvailabilityUpdateFailed)?;

    if !taken {
        return Err(CirculationError::BookUnavailable);
    }

    // 5. write the record
    let record = borrow_record::open_borrow_record(patron_id, book.id, cmd.borrowed_at);

    if let Err(e) = deps.borrow_records.insert(record.clone()).await {
        restore_copy(deps, &record).await;
        return Err(CirculationError::RecordInsertFailed(e));
    }

    tracing::info!(
        patron_id = %record.patron_id,
        book_id = %record.book_id,
        due_date = %record.due_date.format("%Y-%m-%d"),
        "book borrowed"
    );

    Ok(BorrowReceipt {
        record,
        title: book.title,
    })
}

/// Take a copy back from a patron
///
/// The pair must have an active record. The copy goes back on the shelf,
/// the late fee is assessed and logged but not charged, and the record gets
/// its return date.
///
/// # Errors
/// - InvalidPatronOrBook: either id is malformed
/// - NoActiveBorrow: the patron does not hold this book
/// - AvailabilityUpdateFailed: the increment failed or was refused; the record stays active
/// - ReturnDateUpdateFailed: the record could not be closed (increment reverted)
/// - RepositoryError: looking up the active record failed
pub async fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> Result<String> {
    // 1. well-formed ids
    let patron_id = PatronId::parse(&cmd.patron_id)
        .ok()
        .filter(|_| cmd.book_id.is_well_formed())
        .ok_or(CirculationError::InvalidPatronOrBook)?;

    // 2. the pair has an active record
    deps.borrow_records
        .find_active(&patron_id, cmd.book_id)
        .await
        .map_err(CirculationError::RepositoryError)?
        .ok_or(CirculationError::NoActiveBorrow)?;

    // 3. copy back on the shelf
    match deps.books.update_availability(cmd.book_id, 1).await {
        Ok(true) => {}
        Ok(false) => {
            return Err(CirculationError::AvailabilityUpdateFailed(Box::from(
                "availability increment refused",
            )));
        }
        Err(e) => return Err(CirculationError::AvailabilityUpdateFailed(e)),
    }

    // 4. assess the late fee while the record is still active; it is
    //    reported, not charged
    match fees::calculate_late_fee(deps, patron_id.as_str(), cmd.book_id, cmd.returned_at).await {
        Ok(assessment) => tracing::info!(
            patron_id = %patron_id,
            book_id = %cmd.book_id,
            fee = %assessment.fee_amount,
            days_overdue = assessment.days_overdue,
            status = assessment.status.as_str(),
            "late fee assessed on return"
        ),
        Err(e) => tracing::warn!(
            patron_id = %patron_id,
            book_id = %cmd.book_id,
            error = %e,
            "late fee assessment on return failed"
        ),
    }

    // 5. close the record
    let closed = match deps
        .borrow_records
        .mark_returned(&patron_id, cmd.book_id, cmd.returned_at)
        .await
    {
        Ok(true) => Ok(()),
        Ok(false) => Err(Box::from("no active record to close")),
        Err(e) => Err(e),
    };

    if let Err(e) = closed {
        take_copy_back(deps, &patron_id, cmd.book_id).await;
        return Err(CirculationError::ReturnDateUpdateFailed(e));
    }

    tracing::info!(patron_id = %patron_id, book_id = %cmd.book_id, "book returned");

    Ok(RETURN_CONFIRMATION.to_string())
}

/// Undo the decrement of a borrow whose record could not be written.
async fn restore_copy(deps: &ServiceDependencies, record: &BorrowRecord) {
    match deps.books.update_availability(record.book_id, 1).await {
        Ok(true) => tracing::warn!(
            patron_id = %record.patron_id,
            book_id = %record.book_id,
            "borrow record insert failed, copy restored"
        ),
        Ok(false) | Err(_) => tracing::error!(
            patron_id = %record.patron_id,
            book_id = %record.book_id,
            "borrow record insert failed and copy could not be restored"
        ),
    }
}

/// Undo the increment of a return whose record could not be closed.
async fn take_copy_back(
    deps: &ServiceDependencies,
    patron_id: &PatronId,
    book_id: crate::domain::BookId,
) {
    if !matches!(deps.books.update_availability(book_id, -1).await, Ok(true)) {
        tracing::error!(
            patron_id = %patron_id,
            book_id = %book_id,
            "return date update failed and availability could not be reverted"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookId, PatronId};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_borrow_receipt_message_carries_due_date() {
        let borrowed_at = Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap();
        let record = borrow_record::open_borrow_record(
            PatronId::parse("123456").unwrap(),
            BookId::new(1),
            borrowed_at,
        );
        let receipt = BorrowReceipt {
            record,
            title: "1984".to_string(),
        };

        assert_eq!(
            receipt.message(),
            "Successfully borrowed \"1984\". Due date: 2024-01-24."
        );
    }
}
