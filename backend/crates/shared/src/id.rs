//! Common ID Types
//!
//! Type-safe wrappers around the serial integer primary keys used by the
//! relational store.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use thiserror::Error;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
/// let id: UserId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// ```
pub struct Id<T> {
    value: i32,
    _marker: PhantomData<fn() -> T>,
}

/// Failure to read an ID from its textual form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIdError {
    #[error("ID is not an integer: {0}")]
    NotAnInteger(String),

    #[error("ID must be positive (got {0})")]
    NotPositive(i32),
}

impl<T> Id<T> {
    /// Wrap a raw key (e.g. a column value)
    pub const fn new(value: i32) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying key
    pub const fn get(&self) -> i32 {
        self.value
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i32 = s
            .trim()
            .parse()
            .map_err(|_| ParseIdError::NotAnInteger(s.to_string()))?;

        if value <= 0 {
            return Err(ParseIdError::NotPositive(value));
        }

        Ok(Self::new(value))
    }
}

impl<T> From<i32> for Id<T> {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i32 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i32::deserialize(deserializer).map(Self::new)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for user (principal) IDs
    pub struct User;

    /// Marker for movie IDs
    pub struct Movie;

    /// Marker for genre IDs
    pub struct Genre;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type MovieId = Id<markers::Movie>;
pub type GenreId = Id<markers::Genre>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parse() {
        let id: UserId = "17".parse().unwrap();
        assert_eq!(id.get(), 17);

        let id: MovieId = " 3 ".parse().unwrap();
        assert_eq!(id, MovieId::new(3));
    }

    #[test]
    fn test_id_parse_rejects_garbage() {
        assert!(matches!(
            "abc".parse::<UserId>(),
            Err(ParseIdError::NotAnInteger(_))
        ));
        assert!(matches!(
            "".parse::<UserId>(),
            Err(ParseIdError::NotAnInteger(_))
        ));
        assert_eq!("0".parse::<UserId>(), Err(ParseIdError::NotPositive(0)));
        assert_eq!("-4".parse::<UserId>(), Err(ParseIdError::NotPositive(-4)));
    }

    #[test]
    fn test_id_display_roundtrip() {
        let id = GenreId::new(9);
        assert_eq!(id.to_string(), "9");
        assert_eq!(id.to_string().parse::<GenreId>().unwrap(), id);
    }

    #[test]
    fn test_id_serde_is_plain_integer() {
        let json = serde_json::to_string(&MovieId::new(5)).unwrap();
        assert_eq!(json, "5");

        let id: MovieId = serde_json::from_str("12").unwrap();
        assert_eq!(id.get(), 12);
    }
}
