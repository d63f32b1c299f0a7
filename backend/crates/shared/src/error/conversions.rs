//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion into [`AppError`] and, behind the `axum`
//! feature, the problem-details response rendering.

use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Kind and public message for a database failure
#[cfg(feature = "sqlx")]
pub fn classify_sqlx(err: &sqlx::Error) -> (ErrorKind, &'static str) {
    match err {
        sqlx::Error::RowNotFound => (ErrorKind::NotFound, "Record not found"),
        sqlx::Error::PoolTimedOut => (
            ErrorKind::ServiceUnavailable,
            "Database connection pool exhausted",
        ),
        // https://www.postgresql.org/docs/current/errcodes-appendix.html
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23503") => (ErrorKind::Conflict, "Referenced record does not exist"),
            Some("23505") => (ErrorKind::Conflict, "Duplicate key value"),
            Some("23502") | Some("23514") => (ErrorKind::BadRequest, "Invalid record"),
            Some("57014") => (ErrorKind::GatewayTimeout, "Database query cancelled"),
            _ => (ErrorKind::InternalServerError, "Database error"),
        },
        sqlx::Error::Io(_) => (ErrorKind::ServiceUnavailable, "Database connection error"),
        _ => (ErrorKind::InternalServerError, "Database error"),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, message) = classify_sqlx(&err);
        AppError::new(kind, message).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "sqlx"))]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_classification() {
        assert_eq!(classify_sqlx(&sqlx::Error::RowNotFound).0, ErrorKind::NotFound);
        assert_eq!(
            classify_sqlx(&sqlx::Error::PoolTimedOut).0,
            ErrorKind::ServiceUnavailable
        );
        assert_eq!(
            classify_sqlx(&sqlx::Error::PoolClosed).1,
            "Database error"
        );
    }
}
