use crate::application::{
    catalog::CatalogError, circulation::CirculationError, fees::FeeError,
    reporting::ReportingError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API error
///
/// Wraps the error of whichever service handled the request and maps it to
/// an HTTP response. The body message is the service error's display text.
#[derive(Debug)]
pub enum ApiError {
    Catalog(CatalogError),
    Circulation(CirculationError),
    Fees(FeeError),
    Reporting(ReportingError),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<CirculationError> for ApiError {
    fn from(err: CirculationError) -> Self {
        ApiError::Circulation(err)
    }
}

impl From<FeeError> for ApiError {
    fn from(err: FeeError) -> Self {
        ApiError::Fees(err)
    }
}

impl From<ReportingError> for ApiError {
    fn from(err: ReportingError) -> Self {
        ApiError::Reporting(err)
    }
}

impl ApiError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Catalog(err) => match err {
                CatalogError::DuplicateIsbn => (StatusCode::CONFLICT, "DUPLICATE_ISBN"),
                CatalogError::InsertFailed(_) | CatalogError::RepositoryError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "CATALOG_STORE_ERROR")
                }
                _ => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_BOOK"),
            },

            ApiError::Circulation(err) => match err {
                CirculationError::InvalidPatronId | CirculationError::InvalidPatronOrBook => {
                    (StatusCode::BAD_REQUEST, "INVALID_ID")
                }
                CirculationError::BookNotFound => (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND"),
                CirculationError::BookUnavailable => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "BOOK_UNAVAILABLE")
                }
                CirculationError::BorrowLimitReached => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "BORROW_LIMIT_REACHED")
                }
                CirculationError::NoActiveBorrow => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "NO_ACTIVE_BORROW")
                }
                CirculationError::RecordInsertFailed(_)
                | CirculationError::AvailabilityUpdateFailed(_)
                | CirculationError::ReturnDateUpdateFailed(_)
                | CirculationError::RepositoryError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "CIRCULATION_STORE_ERROR")
                }
            },

            ApiError::Fees(err) => match err {
                FeeError::InvalidPatronId
                | FeeError::InvalidTransactionId
                | FeeError::InvalidRefundAmount
                | FeeError::RefundExceedsMaximum => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
                FeeError::UnableToCalculate | FeeError::NoLateFees => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "NO_PAYABLE_FEE")
                }
                FeeError::BookNotFound => (StatusCode::NOT_FOUND, "BOOK_NOT_FOUND"),
                FeeError::PaymentDeclined(_) | FeeError::RefundRejected(_) => {
                    (StatusCode::PAYMENT_REQUIRED, "PAYMENT_DECLINED")
                }
                FeeError::PaymentProcessing(_) | FeeError::RefundProcessing(_) => {
                    (StatusCode::BAD_GATEWAY, "PAYMENT_GATEWAY_ERROR")
                }
                FeeError::RepositoryError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "FEE_STORE_ERROR")
                }
            },

            ApiError::Reporting(_) => (StatusCode::INTERNAL_SERVER_ERROR, "REPORT_ERROR"),
        }
    }

    fn source_chain(&self) -> String {
        let err: &dyn std::error::Error = match self {
            ApiError::Catalog(e) => e,
            ApiError::Circulation(e) => e,
            ApiError::Fees(e) => e,
            ApiError::Reporting(e) => e,
        };
        let mut chain = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push_str(": ");
            chain.push_str(&cause.to_string());
            source = cause.source();
        }
        chain
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        // collaborator details stay in the log
        if status.is_server_error() {
            tracing::error!(error_type, "{}", self.source_chain());
        }

        let message = match &self {
            ApiError::Catalog(e) => e.to_string(),
            ApiError::Circulation(e) => e.to_string(),
            ApiError::Fees(e) => e.to_string(),
            ApiError::Reporting(e) => e.to_string(),
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
