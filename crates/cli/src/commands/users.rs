//! Customer account commands.

use std::fmt::Write as _;

use sakaya_core::{Email, UserId};
use sakaya_storefront::models::User;

use super::{CliError, open_state, render_with};

pub async fn list(json: bool) -> Result<(), CliError> {
    let state = open_state()?;
    let users = state.store().users().await?.get_all().await?;

    let mut text = format!("{} users", users.len());
    for user in &users {
        let role = if user.is_admin { " (admin)" } else { "" };
        let _ = write!(
            text,
            "\n  {} <{}>{} {}",
            user.name,
            user.email,
            role,
            user.created_at.format("%Y-%m-%d")
        );
    }
    render_with(&users, json, &text)
}

pub async fn add(json: bool, email: &str, name: &str, is_admin: bool) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(|e| CliError::Input(format!("Invalid email: {e}")))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::Input("Name cannot be empty".to_owned()));
    }

    let state = open_state()?;
    let user = User {
        id: UserId::generate(),
        email,
        name: name.to_owned(),
        is_admin,
        created_at: state.clock().now(),
    };
    state.store().users().await?.add(&user).await?;

    tracing::info!(user_id = %user.id, email = %user.email, "User created");
    render_with(
        &user,
        json,
        &format!("Created user {} <{}>", user.name, user.email),
    )
}
