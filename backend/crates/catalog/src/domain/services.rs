//! Domain Services

use crate::error::CatalogResult;

/// Finds a poster for a movie title in an external catalog
#[trait_variant::make(PosterLookup: Send)]
pub trait LocalPosterLookup {
    /// Poster path of the best match, if any
    async fn poster_path(&self, title: &str) -> CatalogResult<Option<String>>;
}
