//! Auth Middleware
//!
//! Access gate for the admin route group.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::{Request, header, request::Parts};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::{AuthenticatedUser, TokenService, authorize};
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AccessGateState {
    pub tokens: Arc<TokenService>,
}

impl AccessGateState {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

/// Middleware that requires a valid bearer access token.
///
/// On success the verified [`AuthenticatedUser`] is stored in the request
/// extensions for downstream handlers.
pub async fn require_access_token(
    State(state): State<AccessGateState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());

    let user = authorize(&state.tokens, header_value).map_err(reject)?;

    tracing::debug!(user_id = %user.user_id, "Access token accepted");
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

fn reject(err: AuthError) -> Response {
    ([("X-Auth-Required", "true")], err).into_response()
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| reject(AuthError::Unauthorized("access gate not applied".to_string())))
    }
}
