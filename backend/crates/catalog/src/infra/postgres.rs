//! PostgreSQL Repository Implementations

use std::future::Future;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use kernel::id::{GenreId, MovieId};
use platform::deadline::{STORE_TIMEOUT, within};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::entities::{Genre, GenreTag, Movie, MovieDetail};
use crate::domain::repository::MovieRepository;
use crate::domain::value_objects::MovieDraft;
use crate::error::CatalogResult;

const MOVIE_COLUMNS: &str = "id, title, release_date, runtime, mpaa_rating, description, \
     coalesce(image, '') AS image, created_at, updated_at";

/// PostgreSQL-backed catalog repository
#[derive(Clone)]
pub struct PgMovieRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            timeout: STORE_TIMEOUT,
        }
    }

    /// Override the per-call bound
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, sqlx::Error>>,
    ) -> CatalogResult<T> {
        Ok(within(self.timeout, fut).await?)
    }
}

impl MovieRepository for PgMovieRepository {
    async fn all_movies(&self, genre: Option<GenreId>) -> CatalogResult<Vec<Movie>> {
        let rows = match genre {
            Some(genre) => {
                let sql = format!(
                    "SELECT {MOVIE_COLUMNS} FROM movies \
                     WHERE id IN (SELECT movie_id FROM movies_genres WHERE genre_id = $1) \
                     ORDER BY title"
                );
                self.bounded(
                    sqlx::query_as::<_, MovieRow>(&sql)
                        .bind(genre.get())
                        .fetch_all(&self.pool),
                )
                .await?
            }
            None => {
                let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies ORDER BY title");
                self.bounded(sqlx::query_as::<_, MovieRow>(&sql).fetch_all(&self.pool))
                    .await?
            }
        };

        Ok(rows.into_iter().map(MovieRow::into_movie).collect())
    }

    async fn movie_by_id(&self, id: MovieId) -> CatalogResult<Option<MovieDetail>> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1");

        let detail = self
            .bounded(async {
                let Some(row) = sqlx::query_as::<_, MovieRow>(&sql)
                    .bind(id.get())
                    .fetch_optional(&self.pool)
                    .await?
                else {
                    return Ok(None);
                };

                let genres = sqlx::query_as::<_, GenreTagRow>(
                    r#"
                    SELECT g.id, g.genre
                    FROM movies_genres mg
                    JOIN genres g ON mg.genre_id = g.id
                    WHERE mg.movie_id = $1
                    ORDER BY g.genre
                    "#,
                )
                .bind(id.get())
                .fetch_all(&self.pool)
                .await?;

                Ok::<_, sqlx::Error>(Some(MovieDetail {
                    movie: row.into_movie(),
                    genres: genres.into_iter().map(GenreTagRow::into_tag).collect(),
                }))
            })
            .await?;

        Ok(detail)
    }

    async fn genres(&self) -> CatalogResult<Vec<Genre>> {
        let rows = self
            .bounded(
                sqlx::query_as::<_, GenreRow>(
                    "SELECT id, genre, created_at, updated_at FROM genres ORDER BY genre",
                )
                .fetch_all(&self.pool),
            )
            .await?;

        Ok(rows.into_iter().map(GenreRow::into_genre).collect())
    }

    async fn create_movie(&self, draft: &MovieDraft) -> CatalogResult<MovieId> {
        let now = Utc::now().naive_utc();

        let id = self
            .bounded(async {
                let mut tx = self.pool.begin().await?;

                let id: i32 = sqlx::query_scalar(
                    r#"
                    INSERT INTO movies (
                        title, description, release_date, runtime, mpaa_rating, image,
                        created_at, updated_at
                    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
                    RETURNING id
                    "#,
                )
                .bind(&draft.title)
                .bind(&draft.description)
                .bind(draft.release_date)
                .bind(draft.run_time)
                .bind(&draft.mpaa_rating)
                .bind(&draft.image)
                .bind(now)
                .fetch_one(&mut *tx)
                .await?;

                replace_genre_links(&mut tx, id, &draft.genre_ids).await?;
                tx.commit().await?;

                Ok::<_, sqlx::Error>(id)
            })
            .await?;

        Ok(MovieId::new(id))
    }

    async fn update_movie(&self, id: MovieId, draft: &MovieDraft) -> CatalogResult<bool> {
        let now = Utc::now().naive_utc();

        self.bounded(async {
            let mut tx = self.pool.begin().await?;

            let updated = sqlx::query(
                r#"
                UPDATE movies
                SET title = $1, description = $2, release_date = $3, runtime = $4,
                    mpaa_rating = $5, image = $6, updated_at = $7
                WHERE id = $8
                "#,
            )
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(draft.release_date)
            .bind(draft.run_time)
            .bind(&draft.mpaa_rating)
            .bind(&draft.image)
            .bind(now)
            .bind(id.get())
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if updated == 0 {
                tx.rollback().await?;
                return Ok(false);
            }

            replace_genre_links(&mut tx, id.get(), &draft.genre_ids).await?;
            tx.commit().await?;

            Ok::<_, sqlx::Error>(true)
        })
        .await
    }

    async fn delete_movie(&self, id: MovieId) -> CatalogResult<bool> {
        self.bounded(async {
            let mut tx = self.pool.begin().await?;

            sqlx::query("DELETE FROM movies_genres WHERE movie_id = $1")
                .bind(id.get())
                .execute(&mut *tx)
                .await?;

            let deleted = sqlx::query("DELETE FROM movies WHERE id = $1")
                .bind(id.get())
                .execute(&mut *tx)
                .await?
                .rows_affected();

            tx.commit().await?;

            Ok::<_, sqlx::Error>(deleted > 0)
        })
        .await
    }
}

async fn replace_genre_links(
    tx: &mut Transaction<'_, Postgres>,
    movie_id: i32,
    genre_ids: &[GenreId],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM movies_genres WHERE movie_id = $1")
        .bind(movie_id)
        .execute(&mut **tx)
        .await?;

    for genre_id in genre_ids {
        sqlx::query("INSERT INTO movies_genres (movie_id, genre_id) VALUES ($1, $2)")
            .bind(movie_id)
            .bind(genre_id.get())
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

// ============================================================================
// Row types
// ============================================================================

/// Timestamps are `timestamp without time zone`, stored as UTC
#[derive(sqlx::FromRow)]
struct MovieRow {
    id: i32,
    title: String,
    release_date: NaiveDate,
    runtime: i32,
    mpaa_rating: String,
    description: String,
    image: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl MovieRow {
    fn into_movie(self) -> Movie {
        Movie {
            id: MovieId::new(self.id),
            title: self.title,
            description: self.description,
            release_date: self.release_date,
            run_time: self.runtime,
            mpaa_rating: self.mpaa_rating,
            image: self.image,
            created_at: self.created_at.and_utc(),
            updated_at: self.updated_at.and_utc(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct GenreRow {
    id: i32,
    genre: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl GenreRow {
    fn into_genre(self) -> Genre {
        Genre {
            id: GenreId::new(self.id),
            name: self.genre,
            created_at: self.created_at.and_utc(),
            updated_at: self.updated_at.and_utc(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct GenreTagRow {
    id: i32,
    genre: String,
}

impl GenreTagRow {
    fn into_tag(self) -> GenreTag {
        GenreTag {
            id: GenreId::new(self.id),
            name: self.genre,
        }
    }
}
