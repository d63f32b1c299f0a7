//! API DTOs (Data Transfer Objects)

use serde::Deserialize;

/// Re-export: the token pair is serialized as-is
pub use crate::domain::value_object::claims::TokenPair;

/// Authenticate request
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticateRequest {
    pub email: String,
    pub password: String,
}
