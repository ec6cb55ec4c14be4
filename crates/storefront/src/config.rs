//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SAKAYA_DATABASE_URL` - SQLite URL or path (falls back to `DATABASE_URL`,
//!   then `sqlite://sakaya.db`)
//! - `SAKAYA_SHIPPING_FEE` - Flat shipping fee in yen (default: 500)

use thiserror::Error;

use sakaya_core::Price;

use crate::services::checkout::DEFAULT_SHIPPING_FEE;

/// Database used when no URL is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://sakaya.db";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Local store location
    pub database_url: String,
    /// Shipping added to every order
    pub shipping_fee: Price,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            shipping_fee: DEFAULT_SHIPPING_FEE,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for an unparsable or negative
    /// shipping fee.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("SAKAYA_DATABASE_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());

        let shipping_fee = match lookup("SAKAYA_SHIPPING_FEE") {
            Some(raw) => Price::yen(parse_non_negative("SAKAYA_SHIPPING_FEE", &raw)?),
            None => DEFAULT_SHIPPING_FEE,
        };

        Ok(Self {
            database_url,
            shipping_fee,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a non-negative integer setting.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if `raw` is not a non-negative
/// integer.
pub fn parse_non_negative(key: &str, raw: &str) -> Result<i64, ConfigError> {
    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if value < 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(value)
}
