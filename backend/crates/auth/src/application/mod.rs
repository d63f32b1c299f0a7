//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod authorize;
pub mod config;
pub mod refresh;
pub mod token_service;

// Re-exports
pub use authenticate::{AuthenticateInput, AuthenticateUseCase};
pub use authorize::{AuthenticatedUser, authorize, bearer_token};
pub use config::{AuthConfig, AuthConfigError};
pub use refresh::RefreshUseCase;
pub use token_service::TokenService;
