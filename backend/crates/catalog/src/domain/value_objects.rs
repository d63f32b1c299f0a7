//! Domain Value Objects

use chrono::NaiveDate;
use kernel::id::{GenreId, MovieId};

use crate::domain::entities::Movie;
use crate::error::{CatalogError, CatalogResult};

/// Longest accepted title, in characters
pub const TITLE_MAX_LENGTH: usize = 512;

// ============================================================================
// Movie Draft
// ============================================================================

/// Writable fields of a movie, as submitted by an admin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDraft {
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub run_time: i32,
    pub mpaa_rating: String,
    pub image: String,
    /// Replaces the movie's genre links
    pub genre_ids: Vec<GenreId>,
}

impl MovieDraft {
    /// Trim text fields and reject values the store would accept but the
    /// catalog cannot display.
    pub fn validated(mut self) -> CatalogResult<Self> {
        self.title = self.title.trim().to_string();
        self.mpaa_rating = self.mpaa_rating.trim().to_string();

        if self.title.is_empty() {
            return Err(CatalogError::InvalidInput("title is required".to_string()));
        }
        if self.title.chars().count() > TITLE_MAX_LENGTH {
            return Err(CatalogError::InvalidInput(format!(
                "title exceeds {TITLE_MAX_LENGTH} characters"
            )));
        }
        if self.run_time < 0 {
            return Err(CatalogError::InvalidInput(
                "run_time must not be negative".to_string(),
            ));
        }

        self.genre_ids.sort_by_key(|id| id.get());
        self.genre_ids.dedup();

        Ok(self)
    }
}

// ============================================================================
// Genre Filter
// ============================================================================

/// Parse the `genre` query parameter. Absent, empty and `0` mean "all".
pub fn parse_genre_filter(raw: Option<&str>) -> CatalogResult<Option<GenreId>> {
    match raw.map(str::trim) {
        None | Some("") | Some("0") => Ok(None),
        Some(value) => Ok(Some(value.parse::<GenreId>()?)),
    }
}

/// Parse a `{id}` path segment
pub fn parse_movie_id(raw: &str) -> CatalogResult<MovieId> {
    Ok(raw.parse::<MovieId>()?)
}

// ============================================================================
// Catalog Snapshot
// ============================================================================

/// Title-ordered movies loaded for one GraphQL request
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    movies: Vec<Movie>,
}

impl CatalogSnapshot {
    /// `movies` must already be in title order
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Case-insensitive substring match on title, in snapshot order.
    /// An absent or empty needle matches nothing.
    pub fn search(&self, title_contains: Option<&str>) -> Vec<&Movie> {
        let Some(needle) = title_contains.filter(|n| !n.is_empty()) else {
            return Vec::new();
        };
        let needle = needle.to_lowercase();

        self.movies
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Exact id match
    pub fn get(&self, id: i32) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.id.get() == id)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn movie(id: i32, title: &str) -> Movie {
        let now = Utc::now();
        Movie {
            id: MovieId::new(id),
            title: title.to_string(),
            description: String::new(),
            release_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            run_time: 90,
            mpaa_rating: "PG".to_string(),
            image: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn titles(movies: Vec<&Movie>) -> Vec<&str> {
        movies.into_iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let snapshot =
            CatalogSnapshot::new(vec![movie(1, "Alpha"), movie(2, "Beta"), movie(3, "gamma")]);

        assert_eq!(titles(snapshot.search(Some("a"))), vec!["Alpha", "Beta", "gamma"]);
        assert_eq!(titles(snapshot.search(Some("AL"))), vec!["Alpha"]);
        assert_eq!(titles(snapshot.search(Some("mm"))), vec!["gamma"]);
        assert!(snapshot.search(Some("zeta")).is_empty());
    }

    #[test]
    fn test_search_without_needle_is_empty() {
        let snapshot = CatalogSnapshot::new(vec![movie(1, "Alpha")]);

        assert!(snapshot.search(None).is_empty());
        assert!(snapshot.search(Some("")).is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let snapshot = CatalogSnapshot::new(vec![movie(1, "A"), movie(2, "B")]);

        assert_eq!(snapshot.get(2).map(|m| m.title.as_str()), Some("B"));
        assert!(snapshot.get(3).is_none());
    }

    #[test]
    fn test_parse_genre_filter() {
        assert_eq!(parse_genre_filter(None).unwrap(), None);
        assert_eq!(parse_genre_filter(Some("")).unwrap(), None);
        assert_eq!(parse_genre_filter(Some("0")).unwrap(), None);
        assert_eq!(parse_genre_filter(Some("4")).unwrap(), Some(GenreId::new(4)));
        assert!(matches!(
            parse_genre_filter(Some("drama")),
            Err(CatalogError::InvalidInput(_))
        ));
        assert!(parse_genre_filter(Some("-2")).is_err());
    }

    #[test]
    fn test_draft_validation() {
        let draft = MovieDraft {
            title: "  Heat ".to_string(),
            description: String::new(),
            release_date: NaiveDate::from_ymd_opt(1995, 12, 15).unwrap(),
            run_time: 170,
            mpaa_rating: "R".to_string(),
            image: String::new(),
            genre_ids: vec![GenreId::new(3), GenreId::new(1), GenreId::new(3)],
        };

        let valid = draft.clone().validated().unwrap();
        assert_eq!(valid.title, "Heat");
        assert_eq!(valid.genre_ids, vec![GenreId::new(1), GenreId::new(3)]);

        let blank = MovieDraft {
            title: "   ".to_string(),
            ..draft.clone()
        };
        assert!(matches!(blank.validated(), Err(CatalogError::InvalidInput(_))));

        let negative = MovieDraft {
            run_time: -1,
            ..draft
        };
        assert!(negative.validated().is_err());
    }
}
