//! Principal Entity
//!
//! The identity a token speaks for.

use crate::domain::value_object::user_id::UserId;

/// Authenticated identity: user id plus display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    /// `first_name last_name`
    pub name: String,
}

impl Principal {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Token subject (decimal user id)
    pub fn subject(&self) -> String {
        self.id.to_string()
    }
}
