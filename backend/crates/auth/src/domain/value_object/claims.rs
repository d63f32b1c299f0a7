//! Token Claims
//!
//! Payloads carried inside the two JWTs. The access token is self-describing
//! (issuer, audience, display name); the refresh token carries only the
//! subject and its timestamps.

use serde::{Deserialize, Serialize};

/// `typ` claim value for access tokens
pub const ACCESS_TOKEN_TYPE: &str = "JWT";

/// Access token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Decimal user id
    pub sub: String,
    /// Display name of the principal
    pub name: String,
    pub iss: String,
    pub aud: String,
    /// Issued-at, seconds since epoch (UTC)
    pub iat: i64,
    /// Expiry, seconds since epoch (UTC)
    pub exp: i64,
    pub typ: String,
}

/// Refresh token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// The pair handed to a client after login or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_pair_json_keys() {
        let pair = TokenPair {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
        };
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json, serde_json::json!({"access_token": "a", "refresh_token": "r"}));
    }

    #[test]
    fn test_refresh_claims_have_only_subject_and_times() {
        let claims = RefreshClaims {
            sub: "1".to_string(),
            iat: 10,
            exp: 20,
        };
        let json = serde_json::to_value(&claims).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 3);
        for key in ["sub", "iat", "exp"] {
            assert!(keys.contains(&key));
        }
    }
}
