//! Catalog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Movies, genres, catalog snapshot, repository traits
//! - `application/` - Use cases and the GraphQL schema
//! - `infra/` - Database implementation and TheMovieDB client
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Surface
//! - Public: movie list (optionally by genre), movie detail, genres,
//!   GraphQL `list` / `search` / `get`
//! - Admin (mount behind the access gate): list, read, create, update,
//!   delete; new movies get a poster from TheMovieDB when a key is set

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{CatalogConfig, CatalogSchema, build_schema};
pub use error::{CatalogError, CatalogResult};
pub use infra::{postgres::PgMovieRepository, tmdb::TmdbPosterLookup};
pub use presentation::handlers::home;
pub use presentation::router::{admin_router, catalog_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
