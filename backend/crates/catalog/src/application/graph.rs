//! GraphQL Query Layer
//!
//! One schema is built at startup and shared by every request. Each request
//! loads a fresh [`CatalogSnapshot`] and hands it to the resolvers as
//! request data; nothing is cached between requests.

use std::sync::Arc;

use async_graphql::{
    Context, EmptyMutation, EmptySubscription, Object, Request, Schema, SimpleObject,
};
use chrono::{DateTime, NaiveTime, Utc};

use crate::domain::entities::Movie;
use crate::domain::repository::MovieRepository;
use crate::domain::value_objects::CatalogSnapshot;
use crate::error::{CatalogError, CatalogResult};

pub type CatalogSchema = Schema<CatalogQuery, EmptyMutation, EmptySubscription>;

/// Build the read-only schema
pub fn build_schema() -> CatalogSchema {
    Schema::build(CatalogQuery, EmptyMutation, EmptySubscription).finish()
}

/// GraphQL view of a movie
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Movie", rename_fields = "snake_case")]
pub struct MovieNode {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub release_date: DateTime<Utc>,
    pub run_time: i32,
    pub mpaa_rating: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Movie> for MovieNode {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id.get(),
            title: movie.title.clone(),
            description: movie.description.clone(),
            release_date: movie.release_date.and_time(NaiveTime::MIN).and_utc(),
            run_time: movie.run_time,
            mpaa_rating: movie.mpaa_rating.clone(),
            image: movie.image.clone(),
            created_at: movie.created_at,
            updated_at: movie.updated_at,
        }
    }
}

pub struct CatalogQuery;

#[Object(name = "RootQuery")]
impl CatalogQuery {
    /// Get all movies
    async fn list(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<MovieNode>> {
        let snapshot = ctx.data::<CatalogSnapshot>()?;
        Ok(snapshot.movies().iter().map(MovieNode::from).collect())
    }

    /// Search by title
    async fn search(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "titleContains")] title_contains: Option<String>,
    ) -> async_graphql::Result<Vec<MovieNode>> {
        let snapshot = ctx.data::<CatalogSnapshot>()?;
        Ok(snapshot
            .search(title_contains.as_deref())
            .into_iter()
            .map(MovieNode::from)
            .collect())
    }

    /// Get movie by id
    async fn get(&self, ctx: &Context<'_>, id: Option<i32>) -> async_graphql::Result<Option<MovieNode>> {
        let snapshot = ctx.data::<CatalogSnapshot>()?;
        Ok(id.and_then(|id| snapshot.get(id)).map(MovieNode::from))
    }
}

/// Run `query` against `snapshot`. Any GraphQL error collapses into one
/// [`CatalogError::BadQuery`].
pub async fn execute_query(
    schema: &CatalogSchema,
    snapshot: CatalogSnapshot,
    query: &str,
) -> CatalogResult<serde_json::Value> {
    let response = schema.execute(Request::new(query).data(snapshot)).await;

    if response.is_err() {
        let detail = response
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(CatalogError::BadQuery(detail));
    }

    serde_json::to_value(&response).map_err(|e| CatalogError::Internal(e.to_string()))
}

/// Answer one GraphQL request over a freshly loaded snapshot
pub struct GraphQueryUseCase<R>
where
    R: MovieRepository,
{
    repo: Arc<R>,
    schema: CatalogSchema,
}

impl<R> GraphQueryUseCase<R>
where
    R: MovieRepository,
{
    pub fn new(repo: Arc<R>, schema: CatalogSchema) -> Self {
        Self { repo, schema }
    }

    pub async fn execute(&self, query: &str) -> CatalogResult<serde_json::Value> {
        let snapshot = CatalogSnapshot::new(self.repo.all_movies(None).await?);
        tracing::debug!(movies = snapshot.len(), "Loaded catalog snapshot");

        execute_query(&self.schema, snapshot, query).await
    }
}
