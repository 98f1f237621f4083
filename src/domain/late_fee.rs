use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Money;

/// Charged for every whole day past the due date.
pub const DAILY_LATE_FEE: Money = Money::from_cents(50);

/// No single borrow accrues more than this.
pub const MAX_LATE_FEE: Money = Money::from_cents(1500);

/// Outcome tag of a late fee calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LateFeeStatus {
    Success,
    NoActiveRecord,
    InvalidInput,
}

impl LateFeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LateFeeStatus::Success => "success",
            LateFeeStatus::NoActiveRecord => "no-active-record",
            LateFeeStatus::InvalidInput => "invalid-input",
        }
    }
}

/// Late fee owed on one active borrow. Computed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateFeeResult {
    pub fee_amount: Money,
    pub days_overdue: u32,
    pub status: LateFeeStatus,
}

impl LateFeeResult {
    pub fn no_active_record() -> Self {
        Self {
            fee_amount: Money::ZERO,
            days_overdue: 0,
            status: LateFeeStatus::NoActiveRecord,
        }
    }

    pub fn invalid_input() -> Self {
        Self {
            fee_amount: Money::ZERO,
            days_overdue: 0,
            status: LateFeeStatus::InvalidInput,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == LateFeeStatus::Success
    }
}

/// Pure function: whole calendar days between the due date and `as_of`,
/// never negative.
pub fn days_overdue(due_date: DateTime<Utc>, as_of: DateTime<Utc>) -> u32 {
    let days = (as_of.date_naive() - due_date.date_naive()).num_days();
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}

/// Pure function: fee for a borrow due at `due_date`, assessed at `as_of`.
pub fn assess_late_fee(due_date: DateTime<Utc>, as_of: DateTime<Utc>) -> LateFeeResult {
    let days_overdue = days_overdue(due_date, as_of);
    let fee_amount = (DAILY_LATE_FEE * i64::from(days_overdue)).min(MAX_LATE_FEE);

    LateFeeResult {
        fee_amount,
        days_overdue,
        status: LateFeeStatus::Success,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_not_overdue_before_due_date() {
        let result = assess_late_fee(due(), due() - Duration::days(3));
        assert_eq!(result.days_overdue, 0);
        assert_eq!(result.fee_amount, Money::ZERO);
        assert_eq!(result.status, LateFeeStatus::Success);
    }

    #[test]
    fn test_due_day_itself_is_free() {
        let result = assess_late_fee(due(), due() + Duration::hours(11));
        assert_eq!(result.days_overdue, 0);
        assert!(result.fee_amount.is_zero());
    }

    #[test]
    fn test_days_counted_by_calendar_date() {
        // 12:00 due, 00:30 next day: one calendar day late
        let as_of = Utc.with_ymd_and_hms(2024, 5, 2, 0, 30, 0).unwrap();
        assert_eq!(days_overdue(due(), as_of), 1);
    }

    #[test]
    fn test_fee_is_half_dollar_per_day() {
        let result = assess_late_fee(due(), due() + Duration::days(7));
        assert_eq!(result.days_overdue, 7);
        assert_eq!(result.fee_amount, Money::from_cents(350));
    }

    #[test]
    fn test_fee_capped_at_fifteen_dollars() {
        for days in [30, 31, 45, 365] {
            let result = assess_late_fee(due(), due() + Duration::days(days));
            assert_eq!(result.fee_amount, MAX_LATE_FEE, "{} days", days);
            assert_eq!(result.days_overdue, days as u32);
        }
    }

    #[test]
    fn test_fee_monotonic_in_days_overdue() {
        let mut previous = Money::ZERO;
        for days in 0..60 {
            let fee = assess_late_fee(due(), due() + Duration::days(days)).fee_amount;
            assert!(fee >= previous, "fee decreased at day {}", days);
            assert!(fee <= MAX_LATE_FEE);
            previous = fee;
        }
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&LateFeeStatus::NoActiveRecord).unwrap(),
            "\"no-active-record\""
        );
        assert_eq!(LateFeeStatus::InvalidInput.as_str(), "invalid-input");
    }
}
