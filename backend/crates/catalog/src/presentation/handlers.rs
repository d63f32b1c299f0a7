//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::{
    CatalogSchema, CreateMovieUseCase, DeleteMovieUseCase, GetMovieUseCase, GraphQueryUseCase,
    ListGenresUseCase, ListMoviesUseCase, UpdateMovieUseCase,
};
use crate::domain::repository::MovieRepository;
use crate::domain::services::PosterLookup;
use crate::domain::value_objects::{parse_genre_filter, parse_movie_id};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    AdminMovieResponse, GenreResponse, GraphRequest, HomeResponse, MessageResponse, MovieDetailResponse,
    MovieRequest, MovieResponse, MoviesQuery,
};

/// Shared state for public catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R>
where
    R: MovieRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub schema: CatalogSchema,
}

/// Shared state for admin handlers
#[derive(Clone)]
pub struct AdminAppState<R, P>
where
    R: MovieRepository + Clone + Send + Sync + 'static,
    P: PosterLookup + Clone + Sync + 'static,
{
    pub repo: Arc<R>,
    pub posters: Arc<P>,
}

/// GET /
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse::default())
}

// ============================================================================
// Public catalog
// ============================================================================

/// GET /api/movies[?genre=ID]
pub async fn list_movies<R>(
    State(state): State<CatalogAppState<R>>,
    Query(query): Query<MoviesQuery>,
) -> CatalogResult<Json<Vec<MovieResponse>>>
where
    R: MovieRepository + Clone + Send + Sync + 'static,
{
    let genre = parse_genre_filter(query.genre.as_deref())?;
    let movies = ListMoviesUseCase::new(state.repo.clone()).execute(genre).await?;

    Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
}

/// GET /api/movies/{id}
pub async fn get_movie<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<MovieDetailResponse>>
where
    R: MovieRepository + Clone + Send + Sync + 'static,
{
    let id = parse_movie_id(&id)?;
    let detail = GetMovieUseCase::new(state.repo.clone()).execute(id).await?;

    Ok(Json(detail.into()))
}

/// GET /api/genres
pub async fn list_genres<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<Vec<GenreResponse>>>
where
    R: MovieRepository + Clone + Send + Sync + 'static,
{
    let genres = ListGenresUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(genres.into_iter().map(GenreResponse::from).collect()))
}

/// POST /api/graph
pub async fn graph<R>(
    State(state): State<CatalogAppState<R>>,
    body: String,
) -> CatalogResult<Json<serde_json::Value>>
where
    R: MovieRepository + Clone + Send + Sync + 'static,
{
    let request = GraphRequest::from_body(&body);
    let use_case = GraphQueryUseCase::new(state.repo.clone(), state.schema.clone());

    Ok(Json(use_case.execute(&request.query).await?))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /api/admin/movies
pub async fn admin_list_movies<R, P>(
    State(state): State<AdminAppState<R, P>>,
) -> CatalogResult<Json<Vec<MovieResponse>>>
where
    R: MovieRepository + Clone + Send + Sync + 'static,
    P: PosterLookup + Clone + Sync + 'static,
{
    let movies = ListMoviesUseCase::new(state.repo.clone()).execute(None).await?;

    Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
}

/// GET /api/admin/movies/{id}
pub async fn admin_get_movie<R, P>(
    State(state): State<AdminAppState<R, P>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<AdminMovieResponse>>
where
    R: MovieRepository + Clone + Send + Sync + 'static,
    P: PosterLookup + Clone + Sync + 'static,
{
    let id = parse_movie_id(&id)?;
    let detail = GetMovieUseCase::new(state.repo.clone()).execute(id).await?;

    Ok(Json(detail.into()))
}

/// POST /api/admin/movies
pub async fn create_movie<R, P>(
    State(state): State<AdminAppState<R, P>>,
    payload: Result<Json<MovieRequest>, JsonRejection>,
) -> CatalogResult<impl IntoResponse>
where
    R: MovieRepository + Clone + Send + Sync + 'static,
    P: PosterLookup + Clone + Sync + 'static,
{
    let Json(req) = payload.map_err(malformed_body)?;

    let use_case = CreateMovieUseCase::new(state.repo.clone(), state.posters.clone());
    use_case.execute(req.into_draft()?).await?;

    Ok((StatusCode::ACCEPTED, Json(MessageResponse::ok("movie updated"))))
}

/// PUT /api/admin/movies/{id}
pub async fn update_movie<R, P>(
    State(state): State<AdminAppState<R, P>>,
    Path(id): Path<String>,
    payload: Result<Json<MovieRequest>, JsonRejection>,
) -> CatalogResult<impl IntoResponse>
where
    R: MovieRepository + Clone + Send + Sync + 'static,
    P: PosterLookup + Clone + Sync + 'static,
{
    let id = parse_movie_id(&id)?;
    let Json(req) = payload.map_err(malformed_body)?;

    if let Some(body_id) = req.id.filter(|body_id| *body_id != 0 && *body_id != id.get()) {
        tracing::debug!(path_id = %id, body_id, "Ignoring movie id in body");
    }

    UpdateMovieUseCase::new(state.repo.clone())
        .execute(id, req.into_draft()?)
        .await?;

    Ok((StatusCode::ACCEPTED, Json(MessageResponse::ok("movie updated"))))
}

/// DELETE /api/admin/movies/{id}
pub async fn delete_movie<R, P>(
    State(state): State<AdminAppState<R, P>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<MessageResponse>>
where
    R: MovieRepository + Clone + Send + Sync + 'static,
    P: PosterLookup + Clone + Sync + 'static,
{
    let id = parse_movie_id(&id)?;
    DeleteMovieUseCase::new(state.repo.clone()).execute(id).await?;

    Ok(Json(MessageResponse::ok("Movie Deleted")))
}

fn malformed_body(rejection: JsonRejection) -> CatalogError {
    CatalogError::InvalidInput(rejection.body_text())
}
