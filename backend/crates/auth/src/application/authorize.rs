//! Authorize
//!
//! Turns an `Authorization` header value into a verified identity.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::application::token_service::TokenService;
use crate::error::{AuthError, AuthResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Identity attached to a request that passed the access gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub name: String,
    pub expires_at: DateTime<Utc>,
}

/// Extract the token from `Bearer <token>`. The scheme is case-sensitive.
pub fn bearer_token(header: Option<&str>) -> AuthResult<&str> {
    let header = header.ok_or_else(|| AuthError::Unauthorized("no auth header".to_string()))?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty() && !token.contains(' '))
        .ok_or_else(|| AuthError::Unauthorized("invalid auth header".to_string()))?;

    Ok(token)
}

/// Verify the bearer token in `header`
pub fn authorize(tokens: &TokenService, header: Option<&str>) -> AuthResult<AuthenticatedUser> {
    let token = bearer_token(header)?;
    let claims = tokens.verify_access(token)?;

    let user_id: UserId = claims
        .sub
        .parse()
        .map_err(|_| AuthError::Unauthorized(format!("malformed subject {:?}", claims.sub)))?;

    let expires_at = DateTime::from_timestamp(claims.exp, 0)
        .ok_or_else(|| AuthError::Unauthorized("expiry out of range".to_string()))?;

    Ok(AuthenticatedUser {
        user_id,
        name: claims.name,
        expires_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::application::config::AuthConfig;
    use crate::domain::entity::principal::Principal;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");

        let rejected = [
            None,
            Some(""),
            Some("Bearer"),
            Some("Bearer "),
            Some("bearer abc"),
            Some("Basic abc"),
            Some("Bearer a b"),
        ];
        for header in rejected {
            assert!(
                matches!(bearer_token(header), Err(AuthError::Unauthorized(_))),
                "{header:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_authorize_yields_subject() {
        let tokens = TokenService::new(Arc::new(AuthConfig::with_random_secret()));
        let pair = tokens
            .issue_token_pair(&Principal::new(UserId::new(3), "Jane Doe"))
            .unwrap();

        let header = format!("Bearer {}", pair.access_token);
        let user = authorize(&tokens, Some(&header)).unwrap();

        assert_eq!(user.user_id, UserId::new(3));
        assert_eq!(user.name, "Jane Doe");
        assert!(user.expires_at > Utc::now());
    }

    #[test]
    fn test_authorize_rejects_refresh_token() {
        let tokens = TokenService::new(Arc::new(AuthConfig::with_random_secret()));
        let pair = tokens
            .issue_token_pair(&Principal::new(UserId::new(3), "Jane Doe"))
            .unwrap();

        let header = format!("Bearer {}", pair.refresh_token);
        assert!(authorize(&tokens, Some(&header)).is_err());
    }
}
