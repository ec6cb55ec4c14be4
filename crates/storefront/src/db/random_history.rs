//! Random-suggestion history repository.

use sqlx::SqlitePool;

use sakaya_core::RandomHistoryId;

use super::{RepositoryError, decode_json};
use crate::models::{RandomHistoryEntry, Suggestion};

#[derive(sqlx::FromRow)]
struct RandomHistoryRow {
    id: i64,
    suggestion: String,
    timestamp: i64,
}

impl TryFrom<RandomHistoryRow> for RandomHistoryEntry {
    type Error = RepositoryError;

    fn try_from(row: RandomHistoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RandomHistoryId::new(row.id),
            suggestion: decode_json("suggestion", &row.suggestion)?,
            timestamp: row.timestamp,
        })
    }
}

/// Repository for persisted random-page draws.
pub struct RandomHistoryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> RandomHistoryRepository<'a> {
    /// Create a new random history repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a snapshot of `suggestion` drawn at `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn save(
        &self,
        suggestion: &Suggestion,
        timestamp: i64,
    ) -> Result<RandomHistoryEntry, RepositoryError> {
        let snapshot = serde_json::to_string(suggestion)?;
        let result = sqlx::query("INSERT INTO random_history (suggestion, timestamp) VALUES (?, ?)")
            .bind(snapshot)
            .bind(timestamp)
            .execute(self.pool)
            .await?;

        Ok(RandomHistoryEntry {
            id: RandomHistoryId::new(result.last_insert_rowid()),
            suggestion: suggestion.clone(),
            timestamp,
        })
    }

    /// The `limit` most recent draws, newest first.
    ///
    /// Entries are not de-duplicated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row cannot be decoded.
    pub async fn latest(&self, limit: u32) -> Result<Vec<RandomHistoryEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, RandomHistoryRow>(
            "SELECT id, suggestion, timestamp FROM random_history \
             ORDER BY timestamp DESC, id DESC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;
        rows.into_iter().map(RandomHistoryEntry::try_from).collect()
    }
}
