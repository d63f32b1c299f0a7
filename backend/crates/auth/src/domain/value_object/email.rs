//! Email Value Object
//!
//! Login identifier. Validation is deliberately shallow: a malformed address
//! simply fails to match any account.

use derive_more::Display;

use crate::error::{AuthError, AuthResult};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct Email(String);

impl Email {
    /// Trim and check the basic `local@domain` shape.
    ///
    /// Every failure is reported as [`AuthError::InvalidCredentials`] so a
    /// login response never hints at which part of the input was wrong.
    pub fn new(email: impl AsRef<str>) -> AuthResult<Self> {
        let email = email.as_ref().trim();

        if email.is_empty() || email.len() > EMAIL_MAX_LENGTH {
            return Err(AuthError::InvalidCredentials);
        }

        match email.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(email.to_string()))
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("admin@example.com").is_ok());
        assert!(Email::new("user+tag@example.co.jp").is_ok());
    }

    #[test]
    fn test_email_is_trimmed_but_case_preserved() {
        let email = Email::new("  Admin@Example.com ").unwrap();
        assert_eq!(email.as_str(), "Admin@Example.com");
        assert_eq!(email.to_string(), "Admin@Example.com");
    }

    #[test]
    fn test_email_invalid_is_generic() {
        for raw in ["", "   ", "adminexample.com", "@example.com", "admin@", "a@b@c"] {
            assert!(
                matches!(Email::new(raw), Err(AuthError::InvalidCredentials)),
                "{raw:?} should be rejected as invalid credentials"
            );
        }
    }
}
