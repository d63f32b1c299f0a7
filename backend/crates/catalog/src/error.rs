//! Catalog Error Types
//!
//! Catalog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use kernel::id::ParseIdError;
use platform::deadline::DeadlineError;
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-specific error variants
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Requested movie does not exist
    #[error("Movie not found: {0}")]
    MovieNotFound(i32),

    /// GraphQL parse, validation or resolution failure
    #[error("Bad query: {0}")]
    BadQuery(String),

    /// Rejected request input; the message is safe to show
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Store call exceeded its bound
    #[error("Store call exceeded {0:?}")]
    UpstreamTimeout(Duration),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Poster lookup failure (never surfaced to clients)
    #[error("Poster lookup failed: {0}")]
    PosterLookup(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::MovieNotFound(_) => ErrorKind::NotFound,
            CatalogError::BadQuery(_) | CatalogError::InvalidInput(_) => ErrorKind::BadRequest,
            CatalogError::UpstreamTimeout(_) => ErrorKind::GatewayTimeout,
            CatalogError::Database(e) => classify_sqlx(e).0,
            CatalogError::PosterLookup(_) | CatalogError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError; detail stays in the logs
    pub fn into_app_error(self) -> AppError {
        match self {
            CatalogError::MovieNotFound(_) => AppError::not_found("movie not found"),
            CatalogError::BadQuery(_) => AppError::bad_request("Bad query"),
            CatalogError::InvalidInput(message) => AppError::bad_request(message),
            CatalogError::UpstreamTimeout(_) => AppError::gateway_timeout("upstream timeout"),
            CatalogError::Database(e) => AppError::from(e),
            CatalogError::PosterLookup(_) | CatalogError::Internal(_) => {
                AppError::internal("internal error")
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::UpstreamTimeout(limit) => {
                tracing::error!(limit = ?limit, "Catalog store call timed out");
            }
            CatalogError::Internal(msg) | CatalogError::PosterLookup(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            CatalogError::BadQuery(detail) => {
                tracing::warn!(detail = %detail, "GraphQL query rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<DeadlineError<sqlx::Error>> for CatalogError {
    fn from(err: DeadlineError<sqlx::Error>) -> Self {
        match err {
            DeadlineError::Elapsed(limit) => CatalogError::UpstreamTimeout(limit),
            DeadlineError::Inner(e) => CatalogError::Database(e),
        }
    }
}

impl From<ParseIdError> for CatalogError {
    fn from(err: ParseIdError) -> Self {
        CatalogError::InvalidInput(format!("invalid id: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(CatalogError, StatusCode)> = vec![
            (CatalogError::MovieNotFound(9), StatusCode::NOT_FOUND),
            (CatalogError::BadQuery("syntax".into()), StatusCode::BAD_REQUEST),
            (CatalogError::InvalidInput("title".into()), StatusCode::BAD_REQUEST),
            (
                CatalogError::UpstreamTimeout(Duration::from_secs(3)),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (CatalogError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status);
            assert_eq!(error.into_response().status(), expected_status);
        }
    }

    #[test]
    fn test_bad_query_hides_resolver_detail() {
        let app_err = CatalogError::BadQuery("unknown field `secret` on RootQuery".into())
            .into_app_error();
        assert_eq!(app_err.message(), "Bad query");
    }
}
