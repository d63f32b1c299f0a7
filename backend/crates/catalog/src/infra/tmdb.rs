//! TheMovieDB poster lookup

use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::application::config::CatalogConfig;
use crate::domain::services::PosterLookup;
use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    poster_path: Option<String>,
}

/// `search/movie` client; answers `None` for every title when no API key is
/// configured
#[derive(Clone)]
pub struct TmdbPosterLookup {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl TmdbPosterLookup {
    pub fn new(config: &CatalogConfig) -> Self {
        let client = Client::builder()
            .timeout(config.poster_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: config
                .poster_lookup_enabled()
                .then(|| config.tmdb_api_key.clone())
                .flatten(),
            base_url: config.tmdb_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

impl PosterLookup for TmdbPosterLookup {
    async fn poster_path(&self, title: &str) -> CatalogResult<Option<String>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(None);
        };

        let response = self
            .client
            .get(format!("{}/search/movie", self.base_url))
            .query(&[("api_key", api_key), ("query", title)])
            .header(ACCEPT, "application/json")
            .send()
            .await
            // The URL carries the API key
            .map_err(|e| CatalogError::PosterLookup(e.without_url().to_string()))?;

        if !response.status().is_success() {
            return Err(CatalogError::PosterLookup(format!(
                "API returned status: {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::PosterLookup(e.without_url().to_string()))?;

        Ok(first_poster(body))
    }
}

fn first_poster(body: SearchResponse) -> Option<String> {
    body.results
        .into_iter()
        .next()
        .and_then(|result| result.poster_path)
        .filter(|path| !path.is_empty())
}
