//! Catalog Routers

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::CatalogSchema;
use crate::domain::repository::MovieRepository;
use crate::domain::services::PosterLookup;
use crate::infra::{postgres::PgMovieRepository, tmdb::TmdbPosterLookup};
use crate::presentation::handlers::{self, AdminAppState, CatalogAppState};

/// Public catalog router with PostgreSQL repository
pub fn catalog_router(repo: PgMovieRepository, schema: CatalogSchema) -> Router {
    catalog_router_generic(repo, schema)
}

/// Admin router with PostgreSQL repository and TheMovieDB lookup.
/// Mount it behind the access gate.
pub fn admin_router(repo: PgMovieRepository, posters: TmdbPosterLookup) -> Router {
    admin_router_generic(repo, posters)
}

/// Create a generic public catalog router for any repository implementation
pub fn catalog_router_generic<R>(repo: R, schema: CatalogSchema) -> Router
where
    R: MovieRepository + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
        schema,
    };

    Router::new()
        .route("/movies", get(handlers::list_movies::<R>))
        .route("/movies/{id}", get(handlers::get_movie::<R>))
        .route("/genres", get(handlers::list_genres::<R>))
        .route("/graph", post(handlers::graph::<R>))
        .with_state(state)
}

/// Create a generic admin router for any repository / lookup implementation
pub fn admin_router_generic<R, P>(repo: R, posters: P) -> Router
where
    R: MovieRepository + Clone + Send + Sync + 'static,
    P: PosterLookup + Clone + Sync + 'static,
{
    let state = AdminAppState {
        repo: Arc::new(repo),
        posters: Arc::new(posters),
    };

    Router::new()
        .route(
            "/movies",
            get(handlers::admin_list_movies::<R, P>).post(handlers::create_movie::<R, P>),
        )
        .route(
            "/movies/{id}",
            get(handlers::admin_get_movie::<R, P>)
                .put(handlers::update_movie::<R, P>)
                .delete(handlers::delete_movie::<R, P>),
        )
        .with_state(state)
}
