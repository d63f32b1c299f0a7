//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Principal, user entity, token claims, repository traits
//! - `application/` - Token service and use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, access gate
//!
//! ## Features
//! - Email + password login issuing an HS256 access/refresh token pair
//! - Refresh token delivered in an HttpOnly, Secure, SameSite=Strict cookie
//! - Stateless refresh rotation (no server-side revocation)
//! - Bearer access gate for protected route groups
//!
//! ## Security Model
//! - Passwords verified against Argon2id PHC hashes
//! - Unknown email and wrong password are indistinguishable (same error,
//!   same hashing work)
//! - Access and refresh tokens cannot stand in for one another

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{AuthConfig, AuthConfigError, AuthenticatedUser, TokenService};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::middleware::{AccessGateState, require_access_token};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
