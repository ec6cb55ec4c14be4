//! CLI command implementations.

use std::fmt::Display;

use serde::Serialize;
use thiserror::Error;

use sakaya_admin::error::AdminError;
use sakaya_storefront::config::StorefrontConfig;
use sakaya_storefront::db::RepositoryError;
use sakaya_storefront::error::AppError;
use sakaya_storefront::state::AppState;

pub mod admin;
pub mod diagnosis;
pub mod migrate;
pub mod random;
pub mod seed;
pub mod shop;
pub mod users;

/// Errors surfaced by a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Admin(#[from] AdminError),

    /// Bad command-line input.
    #[error("{0}")]
    Input(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<RepositoryError> for CliError {
    fn from(err: RepositoryError) -> Self {
        Self::App(AppError::Database(err))
    }
}

impl From<sakaya_storefront::config::ConfigError> for CliError {
    fn from(err: sakaya_storefront::config::ConfigError) -> Self {
        Self::App(AppError::Config(err))
    }
}

impl From<sakaya_admin::config::ConfigError> for CliError {
    fn from(err: sakaya_admin::config::ConfigError) -> Self {
        Self::Admin(AdminError::Config(err))
    }
}

impl CliError {
    /// Message printed for the user; store and config details stay in the log.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::App(e) => e.user_message().to_owned(),
            Self::Admin(e) => e.user_message().to_owned(),
            Self::Input(_) | Self::Io(_) | Self::Yaml(_) | Self::Json(_) => self.to_string(),
        }
    }

    pub fn log(&self) {
        match self {
            Self::App(e) => e.log(),
            Self::Admin(e) => e.log(),
            _ => tracing::error!(error = %self, "Command failed"),
        }
    }
}

/// Open the store named by the environment.
pub(crate) fn open_state() -> Result<AppState, CliError> {
    let config = StorefrontConfig::from_env()?;
    tracing::debug!(database_url = %config.database_url, "Opening store");
    Ok(AppState::new(config)?)
}

/// Print a view as text, or as pretty JSON with `--json`.
#[allow(clippy::print_stdout)]
pub(crate) fn render<V: Serialize + Display>(view: &V, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{view}");
    }
    Ok(())
}

/// Print a serializable value as JSON, or the given text line.
#[allow(clippy::print_stdout)]
pub(crate) fn render_with<V: Serialize>(value: &V, json: bool, text: &str) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{text}");
    }
    Ok(())
}
