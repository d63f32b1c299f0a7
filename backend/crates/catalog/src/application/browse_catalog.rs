//! Browse Catalog Use Cases
//!
//! Read-only views served to anonymous clients and to the admin area.

use std::sync::Arc;

use kernel::id::{GenreId, MovieId};

use crate::domain::entities::{Genre, Movie, MovieDetail};
use crate::domain::repository::MovieRepository;
use crate::error::{CatalogError, CatalogResult};

/// List movies, optionally filtered by genre
pub struct ListMoviesUseCase<R>
where
    R: MovieRepository,
{
    repo: Arc<R>,
}

impl<R> ListMoviesUseCase<R>
where
    R: MovieRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, genre: Option<GenreId>) -> CatalogResult<Vec<Movie>> {
        let movies = self.repo.all_movies(genre).await?;
        tracing::debug!(count = movies.len(), genre = ?genre.map(|g| g.get()), "Listed movies");
        Ok(movies)
    }
}

/// Fetch one movie with its genres
pub struct GetMovieUseCase<R>
where
    R: MovieRepository,
{
    repo: Arc<R>,
}

impl<R> GetMovieUseCase<R>
where
    R: MovieRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: MovieId) -> CatalogResult<MovieDetail> {
        self.repo
            .movie_by_id(id)
            .await?
            .ok_or(CatalogError::MovieNotFound(id.get()))
    }
}

/// List all genres
pub struct ListGenresUseCase<R>
where
    R: MovieRepository,
{
    repo: Arc<R>,
}

impl<R> ListGenresUseCase<R>
where
    R: MovieRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> CatalogResult<Vec<Genre>> {
        self.repo.genres().await
    }
}
