//! Store migration command.

use super::{CliError, open_state};

/// Open the configured store, creating it and applying the schema if needed.
pub async fn run() -> Result<(), CliError> {
    let state = open_state()?;
    state.store().pool().await?;
    tracing::info!(
        database_url = %state.config().database_url,
        "Store is up to date"
    );
    Ok(())
}
