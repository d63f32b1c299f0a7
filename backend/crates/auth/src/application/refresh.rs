//! Refresh Use Case
//!
//! Rotates a token pair from a still-valid refresh token. Rotation is
//! stateless: the presented refresh token stays valid until its own expiry.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::token_service::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::claims::TokenPair;
use crate::error::{AuthError, AuthResult};

/// Refresh use case
pub struct RefreshUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> RefreshUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    /// `refresh_token` is the raw cookie value, if any
    pub async fn execute(&self, refresh_token: Option<&str>) -> AuthResult<TokenPair> {
        let token = refresh_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::Unauthorized("no refresh cookie".to_string()))?;

        let claims = self.tokens.verify_refresh(token)?;

        let user_id: UserId = claims
            .sub
            .parse()
            .map_err(|_| AuthError::UnknownUser(claims.sub.clone()))?;

        let user = match self.user_repo.find_by_id(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(AuthError::UnknownUser(claims.sub)),
            Err(e @ AuthError::UpstreamTimeout(_)) => return Err(e),
            Err(e) => {
                tracing::error!(error = %e, subject = %claims.sub, "User lookup by id failed");
                return Err(AuthError::UnknownUser(claims.sub));
            }
        };

        let pair = self.tokens.issue_token_pair(&user.principal())?;
        tracing::info!(user_id = %user.id, "Token pair rotated");

        Ok(pair)
    }
}
