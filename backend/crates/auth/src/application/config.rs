//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::cookie::CookieConfig;
use thiserror::Error;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Rejected configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthConfigError {
    #[error("JWT secret must not be empty")]
    EmptySecret,

    #[error("access token TTL ({access:?}) must be shorter than refresh token TTL ({refresh:?})")]
    TtlOrder { access: Duration, refresh: Duration },

    #[error("access token TTL must be positive")]
    ZeroAccessTtl,
}

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: Vec<u8>,
    /// `iss` claim
    pub issuer: String,
    /// `aud` claim
    pub audience: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    /// Refresh cookie envelope (name, path, domain, flags)
    pub refresh_cookie: CookieConfig,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Vec::new(),
            issuer: "example.com".to_string(),
            audience: "example.com".to_string(),
            access_token_ttl: Duration::from_secs(15 * 60), // 15 minutes
            refresh_token_ttl: Duration::from_secs(24 * 3600), // 24 hours
            refresh_cookie: CookieConfig {
                name: "refresh_token".to_string(),
                path: "/".to_string(),
                domain: Some("localhost".to_string()),
                secure: true,
                http_only: true,
                same_site: SameSite::Strict,
            },
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            jwt_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        let mut config = Self::with_random_secret();
        config.refresh_cookie.secure = false;
        config
    }

    /// Check the invariants token issuance relies on
    pub fn validate(&self) -> Result<(), AuthConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(AuthConfigError::EmptySecret);
        }
        if self.access_token_ttl.is_zero() {
            return Err(AuthConfigError::ZeroAccessTtl);
        }
        if self.access_token_ttl >= self.refresh_token_ttl {
            return Err(AuthConfigError::TtlOrder {
                access: self.access_token_ttl,
                refresh: self.refresh_token_ttl,
            });
        }
        Ok(())
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("refresh_cookie", &self.refresh_cookie)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_config_is_valid() {
        let config = AuthConfig::development();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.jwt_secret.len(), 32);
        assert!(!config.refresh_cookie.secure);
    }

    #[test]
    fn test_default_has_no_secret() {
        assert_eq!(AuthConfig::default().validate(), Err(AuthConfigError::EmptySecret));
    }

    #[test]
    fn test_access_ttl_must_be_shorter_than_refresh_ttl() {
        let mut config = AuthConfig::with_random_secret();
        config.access_token_ttl = Duration::from_secs(3600);
        config.refresh_token_ttl = Duration::from_secs(3600);
        assert!(matches!(config.validate(), Err(AuthConfigError::TtlOrder { .. })));

        config.access_token_ttl = Duration::from_secs(7200);
        assert!(matches!(config.validate(), Err(AuthConfigError::TtlOrder { .. })));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let mut config = AuthConfig::default();
        config.jwt_secret = b"super-secret".to_vec();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
