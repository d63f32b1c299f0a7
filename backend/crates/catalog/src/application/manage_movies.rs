//! Manage Movies Use Cases
//!
//! Admin-only writes. Callers are expected to sit behind the access gate.

use std::sync::Arc;

use kernel::id::MovieId;

use crate::domain::repository::MovieRepository;
use crate::domain::services::PosterLookup;
use crate::domain::value_objects::MovieDraft;
use crate::error::{CatalogError, CatalogResult};

/// Create a movie, filling its poster from the external catalog
pub struct CreateMovieUseCase<R, P>
where
    R: MovieRepository,
    P: PosterLookup,
{
    repo: Arc<R>,
    posters: Arc<P>,
}

impl<R, P> CreateMovieUseCase<R, P>
where
    R: MovieRepository,
    P: PosterLookup,
{
    pub fn new(repo: Arc<R>, posters: Arc<P>) -> Self {
        Self { repo, posters }
    }

    pub async fn execute(&self, draft: MovieDraft) -> CatalogResult<MovieId> {
        let mut draft = draft.validated()?;

        // A failed lookup keeps whatever image was submitted
        match self.posters.poster_path(&draft.title).await {
            Ok(Some(path)) => draft.image = path,
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, title = %draft.title, "Poster lookup failed");
            }
        }

        let id = self.repo.create_movie(&draft).await?;
        tracing::info!(movie_id = %id, genres = draft.genre_ids.len(), "Movie created");

        Ok(id)
    }
}

/// Overwrite a movie and its genre links
pub struct UpdateMovieUseCase<R>
where
    R: MovieRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateMovieUseCase<R>
where
    R: MovieRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: MovieId, draft: MovieDraft) -> CatalogResult<()> {
        let draft = draft.validated()?;

        if !self.repo.update_movie(id, &draft).await? {
            return Err(CatalogError::MovieNotFound(id.get()));
        }
        tracing::info!(movie_id = %id, "Movie updated");

        Ok(())
    }
}

/// Delete a movie. Deleting an absent movie succeeds.
pub struct DeleteMovieUseCase<R>
where
    R: MovieRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteMovieUseCase<R>
where
    R: MovieRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: MovieId) -> CatalogResult<()> {
        let existed = self.repo.delete_movie(id).await?;
        tracing::info!(movie_id = %id, existed, "Movie deleted");
        Ok(())
    }
}
