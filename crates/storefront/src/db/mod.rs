//! Local store backed by an embedded SQLite database.
//!
//! # Collections
//!
//! - `products` - Catalog (indexes on `category` and `name`)
//! - `cart` - Cart lines, keyed by a millisecond timestamp id
//! - `orders` - Placed orders (indexes on `status` and `date`)
//! - `users` - Customer accounts (unique index on `email`)
//! - `diagnosis_history` - Append-only diagnosis results
//! - `random_history` - Append-only random-page draws
//! - `session_flags` - Page-scoped key/value markers (admin login)
//!
//! # Schema
//!
//! The schema is created at version 1 by the single migration in
//! `crates/storefront/migrations/`. The database is opened lazily: nothing
//! touches the disk until the first repository is requested.

pub mod cart;
pub mod diagnosis;
pub mod orders;
pub mod products;
pub mod random_history;
pub mod session_flags;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;
use tokio::sync::OnceCell;

pub use cart::CartRepository;
pub use diagnosis::DiagnosisRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use random_history::RandomHistoryRepository;
pub use session_flags::SessionFlagRepository;
pub use users::UserRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The database could not be opened or its schema created.
    #[error("failed to open store: {0}")]
    Open(String),

    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value could not be decoded into its domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A JSON column could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Requested record was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (duplicate key or unique index).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Map an insert failure, turning unique violations into `Conflict`.
pub(crate) fn insert_error(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(err)
}

/// Decode a JSON text column.
pub(crate) fn decode_json<T: serde::de::DeserializeOwned>(
    column: &str,
    raw: &str,
) -> Result<T, RepositoryError> {
    serde_json::from_str(raw)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid {column} column: {e}")))
}

/// Handle to the local store.
///
/// Holds connection options and a lazily created pool; every repository
/// accessor awaits the first open.
pub struct Store {
    options: SqliteConnectOptions,
    max_connections: u32,
    pool: OnceCell<SqlitePool>,
}

impl Store {
    /// Create a store for a `sqlite://` URL or file path.
    ///
    /// The file is created on first use if missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Open` if the URL cannot be parsed.
    pub fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| RepositoryError::Open(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        Ok(Self {
            options,
            max_connections: 4,
            pool: OnceCell::new(),
        })
    }

    /// Create a private in-memory store.
    ///
    /// Uses a single connection that is never recycled, so the database
    /// lives exactly as long as the store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            options: SqliteConnectOptions::new().in_memory(true),
            max_connections: 1,
            pool: OnceCell::new(),
        }
    }

    /// Get the connection pool, opening the database and applying the
    /// schema on first call.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Open` if the database cannot be opened or
    /// the schema cannot be created.
    pub async fn pool(&self) -> Result<&SqlitePool, RepositoryError> {
        self.pool
            .get_or_try_init(|| async {
                let pool = SqlitePoolOptions::new()
                    .max_connections(self.max_connections)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .acquire_timeout(Duration::from_secs(10))
                    .connect_with(self.options.clone())
                    .await
                    .map_err(|e| RepositoryError::Open(e.to_string()))?;

                MIGRATOR
                    .run(&pool)
                    .await
                    .map_err(|e| RepositoryError::Open(format!("schema setup failed: {e}")))?;

                tracing::debug!(
                    filename = %self.options.get_filename().display(),
                    "Local store opened"
                );
                Ok(pool)
            })
            .await
    }

    /// Product collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Open` if the store cannot be opened.
    pub async fn products(&self) -> Result<ProductRepository<'_>, RepositoryError> {
        Ok(ProductRepository::new(self.pool().await?))
    }

    /// Cart collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Open` if the store cannot be opened.
    pub async fn cart(&self) -> Result<CartRepository<'_>, RepositoryError> {
        Ok(CartRepository::new(self.pool().await?))
    }

    /// Order collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Open` if the store cannot be opened.
    pub async fn orders(&self) -> Result<OrderRepository<'_>, RepositoryError> {
        Ok(OrderRepository::new(self.pool().await?))
    }

    /// User collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Open` if the store cannot be opened.
    pub async fn users(&self) -> Result<UserRepository<'_>, RepositoryError> {
        Ok(UserRepository::new(self.pool().await?))
    }

    /// Diagnosis history collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Open` if the store cannot be opened.
    pub async fn diagnosis(&self) -> Result<DiagnosisRepository<'_>, RepositoryError> {
        Ok(DiagnosisRepository::new(self.pool().await?))
    }

    /// Random-suggestion history collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Open` if the store cannot be opened.
    pub async fn random_history(&self) -> Result<RandomHistoryRepository<'_>, RepositoryError> {
        Ok(RandomHistoryRepository::new(self.pool().await?))
    }

    /// Page-scoped key/value flags.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Open` if the store cannot be opened.
    pub async fn session_flags(&self) -> Result<SessionFlagRepository<'_>, RepositoryError> {
        Ok(SessionFlagRepository::new(self.pool().await?))
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("filename", &self.options.get_filename())
            .field("opened", &self.pool.initialized())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_opens_lazily() {
        let store = Store::in_memory();
        assert!(!store.pool.initialized());

        let products = store.products().await.unwrap();
        assert!(products.get_all().await.unwrap().is_empty());
        assert!(store.pool.initialized());
    }

    #[tokio::test]
    async fn test_schema_has_every_collection() {
        let store = Store::in_memory();
        let pool = store.pool().await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' ORDER BY name",
        )
        .fetch_all(pool)
        .await
        .unwrap();

        assert_eq!(
            tables,
            [
                "cart",
                "diagnosis_history",
                "orders",
                "products",
                "random_history",
                "session_flags",
                "users"
            ]
        );
    }

    #[test]
    fn test_rejects_bad_url() {
        assert!(matches!(
            Store::new("sqlite://shop.db?bogus=1"),
            Err(RepositoryError::Open(_))
        ));
    }
}
