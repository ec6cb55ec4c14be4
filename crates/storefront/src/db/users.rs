//! User repository.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use sakaya_core::{Email, UserId};

use super::{RepositoryError, insert_error};
use crate::models::User;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    is_admin: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            email,
            name: row.name,
            is_admin: row.is_admin,
            created_at: row.created_at,
        })
    }
}

/// Repository for the user collection.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get every user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if an email in the database is invalid.
    pub async fn get_all(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, name, is_admin, created_at FROM users ORDER BY created_at, rowid",
        )
        .fetch_all(self.pool)
        .await?;
        rows.into_iter().map(User::try_from).collect()
    }

    /// Get a user by email address, using the unique email index.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the email in the database is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, name, is_admin, created_at FROM users WHERE email = ?",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id or email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(&self, user: &User) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO users (id, email, name, is_admin, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user.id.as_str())
        .bind(user.email.as_str())
        .bind(&user.name)
        .bind(user.is_admin)
        .bind(user.created_at)
        .execute(self.pool)
        .await
        .map_err(|e| insert_error(e, &format!("user {}", user.email)))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::db::Store;

    fn user(email: &str) -> User {
        User {
            id: UserId::generate(),
            email: Email::parse(email).unwrap(),
            name: "山田太郎".to_owned(),
            is_admin: false,
            created_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_add_and_lookup_by_email() {
        let store = Store::in_memory();
        let users = store.users().await.unwrap();
        let taro = user("taro@example.com");

        users.add(&taro).await.unwrap();

        let found = users.get_by_email(&taro.email).await.unwrap();
        assert_eq!(found, Some(taro.clone()));
        assert_eq!(users.get_all().await.unwrap(), vec![taro]);

        let missing = Email::parse("hanako@example.com").unwrap();
        assert!(users.get_by_email(&missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_is_unique() {
        let store = Store::in_memory();
        let users = store.users().await.unwrap();
        users.add(&user("taro@example.com")).await.unwrap();

        let err = users.add(&user("taro@example.com")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }
}
