//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{GenreId, MovieId};

use crate::domain::entities::{Genre, Movie, MovieDetail};
use crate::domain::value_objects::MovieDraft;
use crate::error::CatalogResult;

/// Movie and genre repository trait
#[trait_variant::make(MovieRepository: Send)]
pub trait LocalMovieRepository {
    /// All movies ordered by title, optionally restricted to one genre
    async fn all_movies(&self, genre: Option<GenreId>) -> CatalogResult<Vec<Movie>>;

    /// One movie with its genres
    async fn movie_by_id(&self, id: MovieId) -> CatalogResult<Option<MovieDetail>>;

    /// All genres ordered by name
    async fn genres(&self) -> CatalogResult<Vec<Genre>>;

    /// Insert a movie and its genre links
    async fn create_movie(&self, draft: &MovieDraft) -> CatalogResult<MovieId>;

    /// Overwrite a movie and replace its genre links. `false` if no such movie.
    async fn update_movie(&self, id: MovieId, draft: &MovieDraft) -> CatalogResult<bool>;

    /// Remove a movie and its genre links. `false` if no such movie.
    async fn delete_movie(&self, id: MovieId) -> CatalogResult<bool>;
}
