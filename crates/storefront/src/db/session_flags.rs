//! Page-scoped key/value markers.
//!
//! Plays the role of browser local storage: string keys, string values,
//! no expiry.

use sqlx::SqlitePool;

use super::RepositoryError;

/// Repository for the `session_flags` table.
pub struct SessionFlagRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SessionFlagRepository<'a> {
    /// Create a new session flag repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Read a flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let value = sqlx::query_scalar("SELECT value FROM session_flags WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool)
            .await?;
        Ok(value)
    }

    /// Write a flag, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO session_flags (key, value) VALUES (?, ?) \
             ON CONFLICT (key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Delete a flag. Deleting an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM session_flags WHERE key = ?")
            .bind(key)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}
