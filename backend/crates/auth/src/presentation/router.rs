//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::TokenService;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, tokens: Arc<TokenService>) -> Router {
    auth_router_generic(repo, tokens)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, tokens: Arc<TokenService>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        tokens,
    };

    Router::new()
        .route("/authenticate", post(handlers::authenticate::<R>))
        .route("/refresh", get(handlers::refresh::<R>))
        .route("/logout", get(handlers::logout::<R>))
        .with_state(state)
}
