//! Application Configuration
//!
//! Configuration for the Catalog application layer.

use std::time::Duration;

/// TheMovieDB API root
pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Catalog application configuration
#[derive(Clone)]
pub struct CatalogConfig {
    /// TheMovieDB API key; poster lookup is disabled without one
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: String,
    /// Bound on one poster lookup
    pub poster_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            tmdb_base_url: TMDB_BASE_URL.to_string(),
            poster_timeout: Duration::from_secs(5),
        }
    }
}

impl CatalogConfig {
    pub fn with_tmdb_key(key: impl Into<String>) -> Self {
        Self {
            tmdb_api_key: Some(key.into()),
            ..Default::default()
        }
    }

    pub fn poster_lookup_enabled(&self) -> bool {
        self.tmdb_api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("tmdb_api_key", &self.tmdb_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("tmdb_base_url", &self.tmdb_base_url)
            .field("poster_timeout", &self.poster_timeout)
            .finish()
    }
}
