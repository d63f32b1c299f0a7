//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::{AccessGateState, PgUserRepository, TokenService, auth_router, require_access_token};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
    routing::get,
};
use catalog::{PgMovieRepository, TmdbPosterLookup, admin_router, build_schema, catalog_router, home};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Database connection (schema is managed outside this service)
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(config.store_timeout)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Auth
    let tokens = Arc::new(TokenService::new(Arc::new(config.auth)));
    let users = PgUserRepository::new(pool.clone()).with_timeout(config.store_timeout);

    // Catalog
    let movies = PgMovieRepository::new(pool.clone()).with_timeout(config.store_timeout);
    let posters = TmdbPosterLookup::new(&config.catalog);
    if !posters.is_enabled() {
        tracing::info!("TMDB_API_KEY not set, poster lookup disabled");
    }

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let admin = admin_router(movies.clone(), posters).layer(middleware::from_fn_with_state(
        AccessGateState::new(tokens.clone()),
        require_access_token,
    ));

    let api = catalog_router(movies, build_schema())
        .merge(auth_router(users, tokens))
        .nest("/admin", admin);

    let app = Router::new()
        .route("/", get(home))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.listen_addr);

    let listener = TcpListener::bind(config.listen_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
