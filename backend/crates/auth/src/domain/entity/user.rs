//! User Entity
//!
//! Row of the `users` table as the auth layer sees it.

use chrono::{DateTime, Utc};

use crate::domain::entity::principal::Principal;
use crate::domain::value_object::{email::Email, user_id::UserId, user_password::UserPassword};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Login identifier
    pub email: Email,
    /// Stored password hash
    pub password: UserPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Display name used in the access token `name` claim
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn principal(&self) -> Principal {
        Principal::new(self.id, self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn sample_user() -> User {
        let raw = RawPassword::new("secret".to_string()).unwrap();
        let now = Utc::now();
        User {
            id: UserId::new(1),
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            email: Email::from_db("admin@example.com"),
            password: UserPassword::from_raw(&raw, None).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_principal_name_is_first_space_last() {
        let principal = sample_user().principal();
        assert_eq!(principal.id, UserId::new(1));
        assert_eq!(principal.name, "Admin User");
        assert_eq!(principal.subject(), "1");
    }
}
