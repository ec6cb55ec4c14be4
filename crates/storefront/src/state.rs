//! Application state shared across page controllers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::db::{RepositoryError, Store};
use crate::services::MonotonicClock;

/// Application state shared across all pages.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// local store, configuration and the key clock.
#[derive(Clone, Debug)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: StorefrontConfig,
    store: Store,
    clock: MonotonicClock,
}

impl AppState {
    /// Create state backed by the database named in `config`.
    ///
    /// The database is not touched until the first page runs.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Open` if the database URL is invalid.
    pub fn new(config: StorefrontConfig) -> Result<Self, RepositoryError> {
        let store = Store::new(&config.database_url)?;
        Ok(Self::with_store(config, store))
    }

    /// Create state over an existing store.
    #[must_use]
    pub fn with_store(config: StorefrontConfig, store: Store) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                clock: MonotonicClock::new(),
            }),
        }
    }

    /// State over a private in-memory store with default settings.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_store(StorefrontConfig::default(), Store::in_memory())
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the local store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Get a reference to the clock used for generated keys.
    #[must_use]
    pub fn clock(&self) -> &MonotonicClock {
        &self.inner.clock
    }
}
