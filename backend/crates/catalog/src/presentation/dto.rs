//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::GenreId;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::entities::{Genre, GenreTag, Movie, MovieDetail};
use crate::domain::value_objects::MovieDraft;
use crate::error::{CatalogError, CatalogResult};

// ============================================================================
// Home
// ============================================================================

/// Service status
#[derive(Debug, Clone, Serialize)]
pub struct HomeResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

impl Default for HomeResponse {
    fn default() -> Self {
        Self {
            status: "active",
            message: "Movie Library Home",
            version: "1.0.0",
        }
    }
}

// ============================================================================
// Movies
// ============================================================================

/// `?genre=ID`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoviesQuery {
    pub genre: Option<String>,
}

/// Movie as listed
#[derive(Debug, Clone, Serialize)]
pub struct MovieResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub run_time: i32,
    pub mpaa_rating: String,
    pub image: String,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id.get(),
            title: movie.title,
            description: movie.description,
            release_date: movie.release_date,
            run_time: movie.run_time,
            mpaa_rating: movie.mpaa_rating,
            image: movie.image,
        }
    }
}

/// Movie with its genres
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetailResponse {
    #[serde(flatten)]
    pub movie: MovieResponse,
    pub genres: Vec<GenreResponse>,
    pub genres_array: Vec<i32>,
}

impl From<MovieDetail> for MovieDetailResponse {
    fn from(detail: MovieDetail) -> Self {
        let genres_array = detail.genre_ids().into_iter().map(|id| id.get()).collect();
        Self {
            movie: detail.movie.into(),
            genres: detail.genres.into_iter().map(GenreResponse::from).collect(),
            genres_array,
        }
    }
}

/// Admin single-movie envelope: `{"movies": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct AdminMovieResponse {
    pub movies: MovieDetailResponse,
}

impl From<MovieDetail> for AdminMovieResponse {
    fn from(detail: MovieDetail) -> Self {
        Self {
            movies: detail.into(),
        }
    }
}

/// Create/update body. A body `id` is ignored; the path decides.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieRequest {
    #[serde(default)]
    pub id: Option<i32>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_release_date")]
    pub release_date: NaiveDate,
    #[serde(default)]
    pub run_time: i32,
    #[serde(default)]
    pub mpaa_rating: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub genres_array: Vec<i32>,
}

impl MovieRequest {
    pub fn into_draft(self) -> CatalogResult<MovieDraft> {
        let genre_ids = self
            .genres_array
            .into_iter()
            .map(|id| {
                if id > 0 {
                    Ok(GenreId::new(id))
                } else {
                    Err(CatalogError::InvalidInput(format!("invalid genre id: {id}")))
                }
            })
            .collect::<CatalogResult<Vec<_>>>()?;

        Ok(MovieDraft {
            title: self.title,
            description: self.description,
            release_date: self.release_date,
            run_time: self.run_time,
            mpaa_rating: self.mpaa_rating,
            image: self.image,
            genre_ids,
        })
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn deserialize_release_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_release_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid release_date: {raw}")))
}

/// `{error, message}` acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub error: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            error: false,
            message: message.into(),
        }
    }
}

// ============================================================================
// Genres
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GenreResponse {
    pub id: i32,
    pub genre: String,
    /// Set on genres attached to a movie
    pub checked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Genre> for GenreResponse {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id.get(),
            genre: genre.name,
            checked: false,
            created_at: Some(genre.created_at),
            updated_at: Some(genre.updated_at),
        }
    }
}

impl From<GenreTag> for GenreResponse {
    fn from(tag: GenreTag) -> Self {
        Self {
            id: tag.id.get(),
            genre: tag.name,
            checked: true,
            created_at: None,
            updated_at: None,
        }
    }
}

// ============================================================================
// GraphQL
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct GraphRequest {
    pub query: String,
}

impl GraphRequest {
    /// JSON `{"query": ...}`, or the raw body taken as the query itself
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_| Self {
            query: body.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_date_formats() {
        let expected = NaiveDate::from_ymd_opt(1995, 12, 15);
        assert_eq!(parse_release_date("1995-12-15"), expected);
        assert_eq!(parse_release_date("1995-12-15T00:00:00Z"), expected);
        assert_eq!(parse_release_date("15/12/1995"), None);
    }

    #[test]
    fn test_movie_request_into_draft() {
        let req: MovieRequest = serde_json::from_str(
            r#"{"id":0,"title":"Heat","release_date":"1995-12-15","run_time":170,
                "mpaa_rating":"R","genres_array":[1,4]}"#,
        )
        .unwrap();
        let draft = req.into_draft().unwrap();

        assert_eq!(draft.title, "Heat");
        assert_eq!(draft.genre_ids, vec![GenreId::new(1), GenreId::new(4)]);
        assert!(draft.description.is_empty());
    }

    #[test]
    fn test_movie_request_rejects_bad_genre() {
        let req: MovieRequest = serde_json::from_str(
            r#"{"title":"Heat","release_date":"1995-12-15","genres_array":[0]}"#,
        )
        .unwrap();
        assert!(matches!(req.into_draft(), Err(CatalogError::InvalidInput(_))));
    }

    #[test]
    fn test_graph_request_accepts_json_or_raw() {
        assert_eq!(GraphRequest::from_body(r#"{"query":"{ list { id } }"}"#).query, "{ list { id } }");
        assert_eq!(GraphRequest::from_body("{ list { id } }").query, "{ list { id } }");
    }

    #[test]
    fn test_detail_response_shape() {
        let now = Utc::now();
        let detail = MovieDetail {
            movie: Movie {
                id: kernel::id::MovieId::new(3),
                title: "Heat".to_string(),
                description: String::new(),
                release_date: NaiveDate::from_ymd_opt(1995, 12, 15).unwrap(),
                run_time: 170,
                mpaa_rating: "R".to_string(),
                image: String::new(),
                created_at: now,
                updated_at: now,
            },
            genres: vec![GenreTag {
                id: GenreId::new(2),
                name: "Crime".to_string(),
            }],
        };

        let json = serde_json::to_value(MovieDetailResponse::from(detail)).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["release_date"], "1995-12-15");
        assert_eq!(json["genres"][0]["genre"], "Crime");
        assert_eq!(json["genres"][0]["checked"], true);
        assert!(json["genres"][0].get("created_at").is_none());
        assert_eq!(json["genres_array"], serde_json::json!([2]));
    }
}
