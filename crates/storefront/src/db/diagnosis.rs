//! Diagnosis history repository.

use sqlx::SqlitePool;

use sakaya_core::{Category, DiagnosisRecordId};

use super::{RepositoryError, decode_json};
use crate::models::{DiagnosisRecord, NewDiagnosisRecord};

#[derive(sqlx::FromRow)]
struct DiagnosisRow {
    id: i64,
    answers: String,
    result: String,
    timestamp: i64,
}

impl TryFrom<DiagnosisRow> for DiagnosisRecord {
    type Error = RepositoryError;

    fn try_from(row: DiagnosisRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DiagnosisRecordId::new(row.id),
            answers: decode_json("answers", &row.answers)?,
            result: row
                .result
                .parse::<Category>()
                .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?,
            timestamp: row.timestamp,
        })
    }
}

/// Repository for the append-only diagnosis history.
pub struct DiagnosisRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> DiagnosisRepository<'a> {
    /// Create a new diagnosis repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a result. The key is assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn save(
        &self,
        record: NewDiagnosisRecord,
    ) -> Result<DiagnosisRecord, RepositoryError> {
        let answers = serde_json::to_string(&record.answers)?;
        let result =
            sqlx::query("INSERT INTO diagnosis_history (answers, result, timestamp) VALUES (?, ?, ?)")
                .bind(answers)
                .bind(record.result.as_str())
                .bind(record.timestamp)
                .execute(self.pool)
                .await?;

        Ok(DiagnosisRecord {
            id: DiagnosisRecordId::new(result.last_insert_rowid()),
            answers: record.answers,
            result: record.result,
            timestamp: record.timestamp,
        })
    }

    /// Full history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row cannot be decoded.
    pub async fn history(&self) -> Result<Vec<DiagnosisRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, DiagnosisRow>(
            "SELECT id, answers, result, timestamp FROM diagnosis_history ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;
        rows.into_iter().map(DiagnosisRecord::try_from).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::Store;

    #[tokio::test]
    async fn test_save_assigns_increasing_keys() {
        let store = Store::in_memory();
        let repo = store.diagnosis().await.unwrap();

        let first = repo
            .save(NewDiagnosisRecord {
                answers: vec!["dry".to_owned(), "high".to_owned()],
                result: Category::Shochu,
                timestamp: 1,
            })
            .await
            .unwrap();
        let second = repo
            .save(NewDiagnosisRecord {
                answers: vec!["sweet".to_owned()],
                result: Category::Wine,
                timestamp: 2,
            })
            .await
            .unwrap();

        assert!(second.id > first.id);
        assert_eq!(repo.history().await.unwrap(), vec![first, second]);
    }
}
