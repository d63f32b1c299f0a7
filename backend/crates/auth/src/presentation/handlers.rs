//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::cookie::extract_cookie;

use crate::application::{AuthenticateInput, AuthenticateUseCase, RefreshUseCase, TokenService};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::AuthenticateRequest;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
}

/// POST /api/authenticate
pub async fn authenticate<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<AuthenticateRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(status = %rejection.status(), "Malformed login body");
        AuthError::InvalidCredentials
    })?;

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.tokens.clone());

    let input = AuthenticateInput {
        email: req.email,
        password: req.password,
    };

    let pair = use_case.execute(input).await?;
    let cookie = state.tokens.refresh_cookie(&pair.refresh_token);

    Ok((StatusCode::ACCEPTED, cookie, Json(pair)))
}

/// GET /api/refresh
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let cookie_name = &state.tokens.config().refresh_cookie.name;
    let presented = extract_cookie(&headers, cookie_name);

    let use_case = RefreshUseCase::new(state.repo.clone(), state.tokens.clone());
    let pair = use_case.execute(presented.as_deref()).await?;
    let cookie = state.tokens.refresh_cookie(&pair.refresh_token);

    Ok((StatusCode::OK, cookie, Json(pair)))
}

/// GET /api/logout
pub async fn logout<R>(State(state): State<AuthAppState<R>>) -> impl IntoResponse
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    (StatusCode::ACCEPTED, state.tokens.expired_refresh_cookie(), ())
}
