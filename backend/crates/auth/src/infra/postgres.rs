//! PostgreSQL Repository Implementations

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDateTime;
use platform::deadline::{STORE_TIMEOUT, within};
use sqlx::PgPool;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_password::UserPassword};
use crate::error::AuthResult;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgUserRepository {
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
    ) -> AuthResult<T> {
        Ok(within(self.timeout, fut).await?)
    }
}

impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = self
            .bounded(
                sqlx::query_as::<_, UserRow>(
                    r#"
                    SELECT id, first_name, last_name, email, password, created_at, updated_at
                    FROM users
                    WHERE email = $1
                    "#,
                )
                .bind(email.as_str())
                .fetch_optional(&self.pool),
            )
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let row = self
            .bounded(
                sqlx::query_as::<_, UserRow>(
                    r#"
                    SELECT id, first_name, last_name, email, password, created_at, updated_at
                    FROM users
                    WHERE id = $1
                    "#,
                )
                .bind(id.get())
                .fetch_optional(&self.pool),
            )
            .await?;

        row.map(UserRow::into_user).transpose()
    }
}

// ============================================================================
// Row types
// ============================================================================

/// `users` columns are `timestamp without time zone`, stored as UTC
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            id: UserId::new(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            email: Email::from_db(self.email),
            password: UserPassword::from_phc(self.password)?,
            created_at: self.created_at.and_utc(),
            updated_at: self.updated_at.and_utc(),
        })
    }
}
