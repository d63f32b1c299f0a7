//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod postgres;
pub mod tmdb;

pub use postgres::PgMovieRepository;
pub use tmdb::TmdbPosterLookup;
