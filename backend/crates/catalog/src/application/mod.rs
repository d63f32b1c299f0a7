//! Application Layer
//!
//! Use cases and application services.

pub mod browse_catalog;
pub mod config;
pub mod graph;
pub mod manage_movies;

// Re-exports
pub use browse_catalog::{GetMovieUseCase, ListGenresUseCase, ListMoviesUseCase};
pub use config::CatalogConfig;
pub use graph::{CatalogSchema, GraphQueryUseCase, build_schema};
pub use manage_movies::{CreateMovieUseCase, DeleteMovieUseCase, UpdateMovieUseCase};
