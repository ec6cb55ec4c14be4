//! Admin commands.
//!
//! `login` stores the session marker; every other command resumes it.

use secrecy::SecretString;
use tracing::info;

use sakaya_admin::config::AdminConfig;
use sakaya_admin::routes::{dashboard, products};
use sakaya_admin::session::{self, AdminSession};
use sakaya_core::{OrderId, OrderStatus, ProductId};
use sakaya_storefront::state::AppState;

use super::seed::load_products;
use super::{CliError, open_state, render, render_with};

async fn restore() -> Result<(AppState, AdminConfig, AdminSession), CliError> {
    let config = AdminConfig::from_env()?;
    let state = open_state()?;
    let session = session::restore(&state, &config).await?;
    Ok((state, config, session))
}

pub async fn login(json: bool, email: &str, password: String) -> Result<(), CliError> {
    let config = AdminConfig::from_env()?;
    let state = open_state()?;
    let password = SecretString::from(password);

    let session = session::login(&state, &config, email, &password).await?;
    render_with(
        &session,
        json,
        &format!("ログインしました: {}", session.email()),
    )
}

pub async fn logout() -> Result<(), CliError> {
    let (state, _, session) = restore().await?;
    session::logout(&state, session).await?;
    info!("Logged out");
    Ok(())
}

pub async fn dashboard(json: bool) -> Result<(), CliError> {
    let (state, config, session) = restore().await?;
    render(&dashboard::show(&state, &config, &session).await?, json)
}

async fn set_status(json: bool, order_id: &str, next: OrderStatus) -> Result<(), CliError> {
    let (state, _, session) = restore().await?;
    let order =
        dashboard::update_order_status(&state, &session, &OrderId::new(order_id), next).await?;
    render_with(
        &order,
        json,
        &format!("{}: {}", order.id, order.status.label()),
    )
}

pub async fn ship(json: bool, order_id: &str) -> Result<(), CliError> {
    set_status(json, order_id, OrderStatus::Shipped).await
}

pub async fn cancel(json: bool, order_id: &str) -> Result<(), CliError> {
    set_status(json, order_id, OrderStatus::Cancelled).await
}

pub async fn list_products(json: bool) -> Result<(), CliError> {
    let (state, _, session) = restore().await?;
    render(&products::list(&state, &session).await?, json)
}

pub async fn add_product(file: &str) -> Result<(), CliError> {
    let (state, _, session) = restore().await?;
    for product in load_products(file).await? {
        products::add(&state, &session, &product).await?;
        info!(product_id = %product.id, "Added {}", product.name);
    }
    Ok(())
}

pub async fn update_product(file: &str) -> Result<(), CliError> {
    let (state, _, session) = restore().await?;
    for product in load_products(file).await? {
        products::update(&state, &session, &product).await?;
        info!(product_id = %product.id, "Saved {}", product.name);
    }
    Ok(())
}

pub async fn delete_product(id: i64) -> Result<(), CliError> {
    let (state, _, session) = restore().await?;
    products::delete(&state, &session, ProductId::new(id)).await?;
    info!(product_id = id, "Deleted product");
    Ok(())
}
