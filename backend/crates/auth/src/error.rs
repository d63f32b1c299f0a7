//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Variants carry internal detail for the
//! logs; what a client sees comes only from [`AuthError::public_message`].

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::deadline::DeadlineError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are never distinguished
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, tampered or expired token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Token subject does not resolve to a principal
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// Token issuance failed
    #[error("Token signing failed: {0}")]
    Signing(jsonwebtoken::errors::Error),

    /// Store call exceeded its bound
    #[error("Store call exceeded {0:?}")]
    UpstreamTimeout(Duration),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials => ErrorKind::BadRequest,
            AuthError::Unauthorized(_) | AuthError::UnknownUser(_) => ErrorKind::Unauthorized,
            AuthError::UpstreamTimeout(_) => ErrorKind::GatewayTimeout,
            AuthError::Signing(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Fixed client-facing message per variant
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid credentials",
            AuthError::Unauthorized(_) => "not authorized",
            AuthError::UnknownUser(_) => "unknown user",
            AuthError::Signing(_) => "error generating token",
            AuthError::UpstreamTimeout(_) => "upstream timeout",
            AuthError::Database(_) | AuthError::Internal(_) => "internal error",
        }
    }

    /// Convert to AppError. Token failures tell the client to log in again.
    pub fn to_app_error(&self) -> AppError {
        let error = AppError::new(self.kind(), self.public_message());
        match self {
            AuthError::Unauthorized(_) | AuthError::UnknownUser(_) => {
                error.with_action("authenticate again")
            }
            _ => error,
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Signing(e) => {
                tracing::error!(error = %e, "Token signing failed");
            }
            AuthError::UpstreamTimeout(limit) => {
                tracing::error!(limit = ?limit, "User store call timed out");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::UnknownUser(subject) => {
                tracing::warn!(subject = %subject, "Token subject does not resolve");
            }
            AuthError::Unauthorized(reason) => {
                tracing::debug!(reason = %reason, "Token rejected");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<DeadlineError<sqlx::Error>> for AuthError {
    fn from(err: DeadlineError<sqlx::Error>) -> Self {
        match err {
            DeadlineError::Elapsed(limit) => AuthError::UpstreamTimeout(limit),
            DeadlineError::Inner(e) => AuthError::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (AuthError::Unauthorized("expired".into()), StatusCode::UNAUTHORIZED),
            (AuthError::UnknownUser("42".into()), StatusCode::UNAUTHORIZED),
            (
                AuthError::UpstreamTimeout(Duration::from_secs(3)),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                AuthError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status);
            assert_eq!(error.into_response().status(), expected_status);
        }
    }

    #[test]
    fn test_public_message_hides_detail() {
        let err = AuthError::Unauthorized("InvalidSignature for sub=7".into());
        assert_eq!(err.to_app_error().message(), "not authorized");

        let err = AuthError::Internal("users table missing".into());
        assert_eq!(err.to_app_error().message(), "internal error");
    }

    #[test]
    fn test_token_failures_carry_action() {
        let err = AuthError::Unauthorized("expired".into()).to_app_error();
        assert_eq!(err.action(), Some("authenticate again"));

        let err = AuthError::UnknownUser("42".into()).to_app_error();
        assert_eq!(err.action(), Some("authenticate again"));

        assert!(AuthError::InvalidCredentials.to_app_error().action().is_none());
    }

    #[test]
    fn test_deadline_conversion() {
        let err: AuthError = DeadlineError::<sqlx::Error>::Elapsed(Duration::from_secs(3)).into();
        assert!(matches!(err, AuthError::UpstreamTimeout(_)));

        let err: AuthError = DeadlineError::Inner(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, AuthError::Database(_)));
    }
}
