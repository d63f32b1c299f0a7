//! Authenticate Use Case
//!
//! Checks an email/password pair against the user store and issues a token
//! pair. An unknown email and a wrong password are indistinguishable to the
//! caller, both in the error returned and in the work performed.

use std::sync::Arc;

use crate::application::token_service::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::claims::TokenPair;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Authenticate input
pub struct AuthenticateInput {
    pub email: String,
    pub password: String,
}

/// Authenticate use case
pub struct AuthenticateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> AuthenticateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    pub async fn execute(&self, input: AuthenticateInput) -> AuthResult<TokenPair> {
        let email = Email::new(&input.email)?;
        let password = RawPassword::new(input.password)?;

        let user = self.find_user(&email).await?;
        let stored = user.as_ref().map(|u| u.password.clone());
        let verified = self.verify_password(stored, password).await?;

        let Some(user) = user else {
            return Err(AuthError::InvalidCredentials);
        };
        if !verified {
            tracing::info!(user_id = %user.id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.tokens.issue_token_pair(&user.principal())?;
        tracing::info!(user_id = %user.id, "User authenticated");

        Ok(tokens)
    }

    /// Argon2 runs on the blocking pool. Without a stored hash the same work
    /// is spent against a dummy hash and the result is always `false`.
    async fn verify_password(
        &self,
        stored: Option<UserPassword>,
        password: RawPassword,
    ) -> AuthResult<bool> {
        let pepper = self.tokens.config().password_pepper.clone();

        tokio::task::spawn_blocking(move || match stored {
            Some(stored) => stored.verify(&password, pepper.as_deref()),
            None => {
                password.equalize_timing(pepper.as_deref());
                false
            }
        })
        .await
        .map_err(|e| AuthError::Internal(format!("password verification task failed: {e}")))
    }

    /// Lookup failures other than a timeout read as "no such user"
    async fn find_user(&self, email: &Email) -> AuthResult<Option<User>> {
        match self.user_repo.find_by_email(email).await {
            Ok(user) => Ok(user),
            Err(e @ AuthError::UpstreamTimeout(_)) => Err(e),
            Err(e) => {
                tracing::error!(error = %e, "User lookup by email failed");
                Ok(None)
            }
        }
    }
}
