use crate::application::fees::FeeError;
use thiserror::Error;

/// Patron report errors
#[derive(Debug, Error)]
pub enum ReportingError {
    #[error("Database error occurred while building the patron report.")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Late fees could not be calculated for the patron report.")]
    FeeCalculation(#[source] FeeError),
}

pub type Result<T> = std::result::Result<T, ReportingError>;
