//! Token Service
//!
//! Issues and verifies the HS256 access/refresh pair and stamps out the
//! refresh cookie envelope. Holds only read-only key material, so one
//! instance is shared by every request.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use platform::cookie::SetCookie;
use serde::Deserialize;

use crate::application::config::AuthConfig;
use crate::domain::entity::principal::Principal;
use crate::domain::value_object::claims::{
    ACCESS_TOKEN_TYPE, AccessClaims, RefreshClaims, TokenPair,
};
use crate::error::{AuthError, AuthResult};

/// Refresh payload plus the one claim it must not carry
#[derive(Deserialize)]
struct RefreshEnvelope {
    #[serde(flatten)]
    claims: RefreshClaims,
    #[serde(default)]
    aud: Option<serde_json::Value>,
}

pub struct TokenService {
    config: Arc<AuthConfig>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_validation: Validation,
    refresh_validation: Validation,
}

impl TokenService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(&config.jwt_secret);
        let decoding_key = DecodingKey::from_secret(&config.jwt_secret);

        let mut access_validation = Validation::new(Algorithm::HS256);
        access_validation.leeway = 0;
        access_validation.set_issuer(&[config.issuer.as_str()]);
        access_validation.set_audience(&[config.audience.as_str()]);
        access_validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

        let mut refresh_validation = Validation::new(Algorithm::HS256);
        refresh_validation.leeway = 0;
        refresh_validation.validate_aud = false;
        refresh_validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            config,
            encoding_key,
            decoding_key,
            access_validation,
            refresh_validation,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Sign a fresh pair for `principal`, valid from now
    pub fn issue_token_pair(&self, principal: &Principal) -> AuthResult<TokenPair> {
        self.issue_token_pair_at(principal, Utc::now())
    }

    /// Sign a pair as if issued at `now`
    pub fn issue_token_pair_at(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> AuthResult<TokenPair> {
        let iat = now.timestamp();
        let subject = principal.subject();

        let access = AccessClaims {
            sub: subject.clone(),
            name: principal.name.clone(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat,
            exp: expiry(iat, self.config.access_token_ttl),
            typ: ACCESS_TOKEN_TYPE.to_string(),
        };
        let refresh = RefreshClaims {
            sub: subject,
            iat,
            exp: expiry(iat, self.config.refresh_token_ttl),
        };

        let header = Header::new(Algorithm::HS256);
        let access_token =
            encode(&header, &access, &self.encoding_key).map_err(AuthError::Signing)?;
        let refresh_token =
            encode(&header, &refresh, &self.encoding_key).map_err(AuthError::Signing)?;

        tracing::debug!(
            subject = %access.sub,
            access_exp = access.exp,
            refresh_exp = refresh.exp,
            "Issued token pair"
        );

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Verify signature, expiry, issuer and audience of an access token
    pub fn verify_access(&self, token: &str) -> AuthResult<AccessClaims> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.access_validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::Unauthorized(format!("access token rejected: {e}")))
    }

    /// Verify signature and expiry of a refresh token
    pub fn verify_refresh(&self, token: &str) -> AuthResult<RefreshClaims> {
        let envelope = decode::<RefreshEnvelope>(token, &self.decoding_key, &self.refresh_validation)
            .map_err(|e| AuthError::Unauthorized(format!("refresh token rejected: {e}")))?
            .claims;

        if envelope.aud.is_some() {
            return Err(AuthError::Unauthorized(
                "access token presented as refresh token".to_string(),
            ));
        }

        Ok(envelope.claims)
    }

    /// Cookie carrying `refresh_token` for the refresh TTL
    pub fn refresh_cookie(&self, refresh_token: &str) -> SetCookie {
        self.config.refresh_cookie.issue(
            refresh_token,
            self.config.refresh_token_ttl,
            Utc::now(),
        )
    }

    /// Cookie instructing the client to drop the refresh token
    pub fn expired_refresh_cookie(&self) -> SetCookie {
        self.config.refresh_cookie.expire()
    }
}

fn expiry(iat: i64, ttl: Duration) -> i64 {
    iat.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use kernel::id::UserId;
    use platform::cookie::SameSite;

    fn service() -> TokenService {
        TokenService::new(Arc::new(AuthConfig::with_random_secret()))
    }

    fn principal() -> Principal {
        Principal::new(UserId::new(7), "Admin User")
    }

    #[test]
    fn test_access_expires_before_refresh() {
        let tokens = service();
        let pair = tokens.issue_token_pair(&principal()).unwrap();

        let access = tokens.verify_access(&pair.access_token).unwrap();
        let refresh = tokens.verify_refresh(&pair.refresh_token).unwrap();

        assert!(access.exp < refresh.exp);
        assert_eq!(access.iat, refresh.iat);
        assert_eq!(access.exp - access.iat, 900);
        assert_eq!(refresh.exp - refresh.iat, 86_400);
    }

    #[test]
    fn test_subject_and_claims_round_trip() {
        let tokens = service();
        let pair = tokens.issue_token_pair(&principal()).unwrap();

        let access = tokens.verify_access(&pair.access_token).unwrap();
        assert_eq!(access.sub, "7");
        assert_eq!(access.name, "Admin User");
        assert_eq!(access.iss, "example.com");
        assert_eq!(access.aud, "example.com");
        assert_eq!(access.typ, "JWT");

        let refresh = tokens.verify_refresh(&pair.refresh_token).unwrap();
        assert_eq!(refresh.sub, "7");
    }

    #[test]
    fn test_refresh_token_payload_is_minimal() {
        let tokens = service();
        let pair = tokens.issue_token_pair(&principal()).unwrap();

        let claims = decode::<serde_json::Value>(
            &pair.refresh_token,
            &tokens.decoding_key,
            &tokens.refresh_validation,
        )
        .unwrap()
        .claims;
        let object = claims.as_object().unwrap();

        assert_eq!(object.len(), 3);
        assert!(object.contains_key("sub"));
        assert!(!object.contains_key("name"));
        assert!(!object.contains_key("iss"));
        assert!(!object.contains_key("aud"));
    }

    #[test]
    fn test_tampering_any_byte_fails() {
        let tokens = service();
        let pair = tokens.issue_token_pair(&principal()).unwrap();
        let original = pair.access_token.as_bytes();

        for i in 0..original.len() {
            if original[i] == b'.' {
                continue;
            }
            let mut tampered = original.to_vec();
            tampered[i] = if original[i] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(tampered).unwrap();

            assert!(
                tokens.verify_access(&tampered).is_err(),
                "tampered byte {i} was accepted"
            );
        }
    }

    #[test]
    fn test_other_secret_is_rejected() {
        let pair = service().issue_token_pair(&principal()).unwrap();
        let other = service();

        assert!(other.verify_access(&pair.access_token).is_err());
        assert!(other.verify_refresh(&pair.refresh_token).is_err());
    }

    #[test]
    fn test_expired_tokens_are_rejected() {
        let tokens = service();
        let issued = Utc::now() - TimeDelta::hours(2);
        let pair = tokens.issue_token_pair_at(&principal(), issued).unwrap();

        assert!(matches!(
            tokens.verify_access(&pair.access_token),
            Err(AuthError::Unauthorized(_))
        ));
        // Refresh TTL (24h) has not elapsed yet
        assert!(tokens.verify_refresh(&pair.refresh_token).is_ok());

        let long_ago = Utc::now() - TimeDelta::days(2);
        let pair = tokens.issue_token_pair_at(&principal(), long_ago).unwrap();
        assert!(tokens.verify_refresh(&pair.refresh_token).is_err());
    }

    #[test]
    fn test_tokens_are_not_interchangeable() {
        let tokens = service();
        let pair = tokens.issue_token_pair(&principal()).unwrap();

        assert!(tokens.verify_access(&pair.refresh_token).is_err());
        assert!(tokens.verify_refresh(&pair.access_token).is_err());
    }

    #[test]
    fn test_wrong_audience_is_rejected() {
        let issuer = service();
        let mut config = (*issuer.config).clone();
        config.audience = "other.example".to_string();
        let verifier = TokenService::new(Arc::new(config));

        let pair = issuer.issue_token_pair(&principal()).unwrap();
        assert!(verifier.verify_access(&pair.access_token).is_err());
    }

    #[test]
    fn test_refresh_cookie_envelope() {
        let tokens = service();
        let cookie = tokens.refresh_cookie("abc.def.ghi");

        assert_eq!(cookie.name, "refresh_token");
        assert_eq!(cookie.value, "abc.def.ghi");
        assert_eq!(cookie.path, "/");
        assert_eq!(cookie.domain.as_deref(), Some("localhost"));
        assert_eq!(cookie.max_age_secs, 86_400);
        assert_eq!(cookie.same_site, SameSite::Strict);
        assert!(cookie.http_only);
        assert!(cookie.secure);
        assert!(cookie.expires > Utc::now());
    }

    #[test]
    fn test_expired_refresh_cookie() {
        let cookie = service().expired_refresh_cookie();

        assert_eq!(cookie.name, "refresh_token");
        assert!(cookie.value.is_empty());
        assert_eq!(cookie.max_age_secs, -1);
        assert_eq!(cookie.expires, DateTime::UNIX_EPOCH);
        assert_eq!(cookie.same_site, SameSite::Strict);
        assert!(cookie.http_only);
        assert!(cookie.secure);
    }
}
