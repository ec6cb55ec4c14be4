//! Home, product listing, cart and checkout.

use sakaya_core::{CartItemId, Category, ProductId};
use sakaya_storefront::routes::{cart, home, products};
use sakaya_storefront::services::CheckoutCustomer;

use super::{CliError, open_state, render, render_with};

pub async fn home(json: bool) -> Result<(), CliError> {
    let state = open_state()?;
    render(&home::show(&state).await?, json)
}

pub async fn products(
    json: bool,
    category: Option<Category>,
    search: Option<String>,
) -> Result<(), CliError> {
    let state = open_state()?;
    let view = products::index(&state, products::ProductsQuery { category, search }).await?;
    render(&view, json)
}

pub async fn cart(json: bool) -> Result<(), CliError> {
    let state = open_state()?;
    render(&cart::show(&state).await?, json)
}

pub async fn add_to_cart(json: bool, product_id: i64) -> Result<(), CliError> {
    let state = open_state()?;
    let item = products::add_to_cart(&state, ProductId::new(product_id)).await?;
    render_with(
        &item,
        json,
        &format!("{}をカートに追加しました (#{})", item.name, item.id),
    )
}

pub async fn update_quantity(json: bool, id: i64, quantity: i64) -> Result<(), CliError> {
    let state = open_state()?;
    let view = cart::update_quantity(&state, CartItemId::new(id), quantity).await?;
    render(&view, json)
}

pub async fn remove(json: bool, id: i64) -> Result<(), CliError> {
    let state = open_state()?;
    render(&cart::remove(&state, CartItemId::new(id)).await?, json)
}

pub async fn checkout(
    json: bool,
    name: Option<String>,
    email: Option<String>,
    shipping_address: Option<String>,
) -> Result<(), CliError> {
    let state = open_state()?;
    let order = cart::checkout(
        &state,
        CheckoutCustomer {
            name,
            email,
            shipping_address,
        },
    )
    .await?;

    render_with(
        &order,
        json,
        &format!(
            "ご注文ありがとうございます！\n注文番号: {}\nお名前: {}\n合計: {}\nステータス: {}",
            order.id,
            order.customer_name,
            order.total,
            order.status.label()
        ),
    )
}
