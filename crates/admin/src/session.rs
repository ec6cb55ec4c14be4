//! Admin login state.
//!
//! A successful login stores the `isAdminLoggedIn` marker in the local
//! store's session flags and hands back an [`AdminSession`]. Dashboard
//! operations take `&AdminSession`, so they cannot be reached without one.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;

use sakaya_core::Email;
use sakaya_storefront::state::AppState;

use crate::config::AdminConfig;
use crate::error::{AdminError, Result};

/// Session flag keys.
pub mod keys {
    /// Marker set to `"true"` while an admin is logged in.
    pub const ADMIN_LOGGED_IN: &str = "isAdminLoggedIn";
}

/// Proof of an admin login.
///
/// Only [`login`] and [`restore`] construct one; [`logout`] consumes it.
#[derive(Debug, Serialize)]
pub struct AdminSession {
    email: Email,
}

impl AdminSession {
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }
}

/// Check the credentials and start a session.
///
/// # Errors
///
/// Returns `AdminError::InvalidCredentials` on a mismatch (the marker is
/// left as it was) and `AdminError::Database` if the marker cannot be
/// stored.
#[instrument(skip(state, config, password))]
pub async fn login(
    state: &AppState,
    config: &AdminConfig,
    email: &str,
    password: &SecretString,
) -> Result<AdminSession> {
    let email_matches = email.trim() == config.email.as_str();
    let password_matches = password.expose_secret() == config.password.expose_secret();
    if !(email_matches && password_matches) {
        tracing::warn!("Admin login failed");
        return Err(AdminError::InvalidCredentials);
    }

    state
        .store()
        .session_flags()
        .await?
        .set(keys::ADMIN_LOGGED_IN, "true")
        .await?;

    tracing::info!(email = %config.email, "Admin logged in");
    Ok(AdminSession {
        email: config.email.clone(),
    })
}

/// Resume a session stored by an earlier [`login`].
///
/// # Errors
///
/// Returns `AdminError::NotLoggedIn` unless the marker is `"true"`.
pub async fn restore(state: &AppState, config: &AdminConfig) -> Result<AdminSession> {
    let marker = state
        .store()
        .session_flags()
        .await?
        .get(keys::ADMIN_LOGGED_IN)
        .await?;

    if marker.as_deref() == Some("true") {
        Ok(AdminSession {
            email: config.email.clone(),
        })
    } else {
        Err(AdminError::NotLoggedIn)
    }
}

/// End the session and remove the marker.
///
/// # Errors
///
/// Returns `AdminError::Database` if the marker cannot be removed.
#[instrument(skip(state, session))]
pub async fn logout(state: &AppState, session: AdminSession) -> Result<()> {
    state
        .store()
        .session_flags()
        .await?
        .remove(keys::ADMIN_LOGGED_IN)
        .await?;
    tracing::info!(email = %session.email, "Admin logged out");
    Ok(())
}
