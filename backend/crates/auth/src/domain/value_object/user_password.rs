//! User Password Value Object
//!
//! Domain wrappers over `platform::password`. Every failure collapses into
//! [`AuthError::InvalidCredentials`] or an internal error; nothing here
//! tells a caller whether the account exists.

use std::fmt;

use platform::password::{ClearTextPassword, HashedPassword, equalize_timing};

use crate::error::{AuthError, AuthResult};

/// Password as typed by the user. Zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> AuthResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|_| AuthError::InvalidCredentials)
    }

    /// Spend the same work as a real verification when no account matched
    pub fn equalize_timing(&self, pepper: Option<&[u8]>) {
        equalize_timing(&self.0, pepper);
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Stored Argon2id hash of a user's password
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Parse the PHC string stored in the `users.password` column
    pub fn from_phc(phc: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc)
            .map(Self)
            .map_err(|e| AuthError::Internal(format!("stored password hash unreadable: {e}")))
    }

    /// Hash a raw password (fixtures, seeding)
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        raw.inner()
            .hash(pepper)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_and_verify() {
        let raw = RawPassword::new("secret".to_string()).unwrap();
        let stored = UserPassword::from_raw(&raw, None).unwrap();

        assert!(stored.verify(&raw, None));
        assert!(!stored.verify(&RawPassword::new("wrong".to_string()).unwrap(), None));
    }

    #[test]
    fn test_from_phc_rejects_garbage() {
        assert!(matches!(
            UserPassword::from_phc("plaintext"),
            Err(AuthError::Internal(_))
        ));
    }

    #[test]
    fn test_oversized_input_is_invalid_credentials() {
        assert!(matches!(
            RawPassword::new("x".repeat(1000)),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
