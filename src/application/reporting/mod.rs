mod errors;
mod reporting_service;

pub use errors::{ReportingError, Result};
pub use reporting_service::{PatronStatusReport, get_patron_status_report};
