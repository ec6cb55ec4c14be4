//! Integration tests for Sakaya.
//!
//! Every test drives the storefront and admin pages end to end against a
//! fresh store: private in-memory by default, or a temporary SQLite file
//! when a test needs to reopen it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sakaya-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use rust_decimal::Decimal;
use secrecy::SecretString;

use sakaya_admin::config::{AdminConfig, ConfigError, DEFAULT_ADMIN_PASSWORD};
use sakaya_admin::error::AdminError;
use sakaya_admin::session::{self, AdminSession};
use sakaya_core::{Category, Email, Price, ProductId, UserId};
use sakaya_storefront::config::StorefrontConfig;
use sakaya_storefront::db::RepositoryError;
use sakaya_storefront::models::{Product, User};
use sakaya_storefront::state::AppState;

/// Storefront state plus the admin configuration used to log in.
pub struct TestContext {
    pub state: AppState,
    pub admin: AdminConfig,
}

impl TestContext {
    /// Fresh context over a private in-memory store with default settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the default admin settings fail to parse.
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            state: AppState::in_memory(),
            admin: default_admin()?,
        })
    }

    /// Context over the SQLite file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` if the path is not a valid database URL.
    pub fn with_file(path: &TempDatabase) -> Result<Self, AdminError> {
        let config = StorefrontConfig {
            database_url: path.url(),
            ..StorefrontConfig::default()
        };
        Ok(Self {
            state: AppState::new(config)?,
            admin: default_admin()?,
        })
    }

    /// Log in with the default admin credentials.
    ///
    /// # Errors
    ///
    /// Returns `AdminError` if the session marker cannot be stored.
    pub async fn login(&self) -> Result<AdminSession, AdminError> {
        let password = SecretString::from(DEFAULT_ADMIN_PASSWORD.to_owned());
        session::login(&self.state, &self.admin, self.admin.email.as_str(), &password).await
    }

    /// Register a customer account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is taken.
    pub async fn register(&self, email: &Email, name: &str) -> Result<User, RepositoryError> {
        let user = User {
            id: UserId::generate(),
            email: email.clone(),
            name: name.to_owned(),
            is_admin: false,
            created_at: self.state.clock().now(),
        };
        self.state.store().users().await?.add(&user).await?;
        Ok(user)
    }
}

fn default_admin() -> Result<AdminConfig, ConfigError> {
    AdminConfig::from_lookup(|_| None)
}

/// A database file path under the system temp directory, removed on drop.
pub struct TempDatabase {
    path: PathBuf,
}

impl TempDatabase {
    #[must_use]
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("sakaya-test-{}.db", uuid::Uuid::new_v4()));
        Self { path }
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("sqlite://{}", self.path.display())
    }
}

impl Default for TempDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

/// A product outside the demo catalog.
#[must_use]
pub fn sample_product(id: i64, stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("特別純米 {id}"),
        category: Category::Sake,
        price: Price::yen(2800),
        description: "旨口の特別純米酒".to_owned(),
        alcohol_percent: Decimal::new(16, 0),
        image: format!("/images/sake{id}.jpg"),
        tags: vec!["特別純米".to_owned()],
        stock,
        pairing: None,
    }
}
