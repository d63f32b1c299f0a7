//! Domain Entities

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{GenreId, MovieId};

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    /// Minutes
    pub run_time: i32,
    pub mpaa_rating: String,
    /// Poster path; empty when unknown
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of the `genres` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Genre as attached to a movie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreTag {
    pub id: GenreId,
    pub name: String,
}

/// A movie together with its genres, ordered by genre name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDetail {
    pub movie: Movie,
    pub genres: Vec<GenreTag>,
}

impl MovieDetail {
    pub fn genre_ids(&self) -> Vec<GenreId> {
        self.genres.iter().map(|g| g.id).collect()
    }
}
