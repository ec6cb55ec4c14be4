//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SAKAYA_ADMIN_EMAIL` - Login email (default: admin@sake-shop.com)
//! - `SAKAYA_ADMIN_PASSWORD` - Login password (default: admin123)
//! - `SAKAYA_LOW_STOCK_THRESHOLD` - Dashboard low-stock cutoff (default: 5)

use secrecy::SecretString;
use thiserror::Error;

use sakaya_core::Email;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@sake-shop.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminConfig {
    /// Email accepted at login
    pub email: Email,
    /// Password accepted at login
    pub password: SecretString,
    /// Products with stock at or below this are flagged on the dashboard
    pub low_stock_threshold: u32,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("low_stock_threshold", &self.low_stock_threshold)
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for a malformed email, an empty
    /// password or a threshold that is not a non-negative integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let email = get_env_or_default(&lookup, "SAKAYA_ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL);
        let email = Email::parse(&email).map_err(|e| {
            ConfigError::InvalidEnvVar("SAKAYA_ADMIN_EMAIL".to_string(), e.to_string())
        })?;

        let password =
            get_env_or_default(&lookup, "SAKAYA_ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD);
        if password.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "SAKAYA_ADMIN_PASSWORD".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let low_stock_threshold = match lookup("SAKAYA_LOW_STOCK_THRESHOLD") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                ConfigError::InvalidEnvVar("SAKAYA_LOW_STOCK_THRESHOLD".to_string(), e.to_string())
            })?,
            None => DEFAULT_LOW_STOCK_THRESHOLD,
        };

        Ok(Self {
            email,
            password: SecretString::from(password),
            low_stock_threshold,
        })
    }
}

/// Get a variable with a default value.
fn get_env_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdminConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.email.as_str(), DEFAULT_ADMIN_EMAIL);
        assert_eq!(config.password.expose_secret(), DEFAULT_ADMIN_PASSWORD);
        assert_eq!(config.low_stock_threshold, 5);
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = AdminConfig::from_lookup(|key| {
            (key == "SAKAYA_ADMIN_PASSWORD").then(|| "hunter2-sake".to_owned())
        })
        .unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2-sake"));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let bad_email =
            AdminConfig::from_lookup(|key| (key == "SAKAYA_ADMIN_EMAIL").then(|| "admin".to_owned()));
        assert!(matches!(bad_email, Err(ConfigError::InvalidEnvVar(_, _))));

        let bad_threshold = AdminConfig::from_lookup(|key| {
            (key == "SAKAYA_LOW_STOCK_THRESHOLD").then(|| "-3".to_owned())
        });
        assert!(matches!(bad_threshold, Err(ConfigError::InvalidEnvVar(_, _))));

        let empty_password =
            AdminConfig::from_lookup(|key| (key == "SAKAYA_ADMIN_PASSWORD").then(String::new));
        assert!(matches!(empty_password, Err(ConfigError::InvalidEnvVar(_, _))));
    }
}
