//! Cart page: listing, quantity changes, removal and checkout.

use std::fmt;

use serde::Serialize;
use tracing::instrument;

use sakaya_core::{CartItemId, Price};

use super::{Route, write_header};
use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::models::{CartItem, CartTotals, Order};
use crate::services::{CheckoutCustomer, place_order};
use crate::state::AppState;

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
    pub shipping_fee: Price,
    /// Subtotal plus shipping, or zero for an empty cart.
    pub total: Price,
}

impl CartView {
    fn new(items: Vec<CartItem>, shipping_fee: Price) -> Self {
        let totals = CartTotals::of(&items);
        let total = if items.is_empty() {
            Price::ZERO
        } else {
            totals.subtotal + shipping_fee
        };
        Self {
            items,
            totals,
            shipping_fee,
            total,
        }
    }
}

/// Display the cart.
///
/// # Errors
///
/// Returns `AppError::Database` if the cart cannot be read.
#[instrument(skip(state))]
pub async fn show(state: &AppState) -> Result<CartView> {
    let items = state.store().cart().await?.get_all().await?;
    Ok(CartView::new(items, state.config().shipping_fee))
}

/// Change the quantity of one line; zero or less removes it.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the line does not exist and
/// `AppError::Database` if the store fails.
#[instrument(skip(state))]
pub async fn update_quantity(state: &AppState, id: CartItemId, quantity: i64) -> Result<CartView> {
    let cart = state.store().cart().await?;
    if quantity <= 0 {
        cart.remove(id).await?;
        return show(state).await;
    }

    let quantity = u32::try_from(quantity)
        .map_err(|_| AppError::BadRequest(format!("quantity out of range: {quantity}")))?;
    cart.set_quantity(id, quantity).await.map_err(|e| match e {
        RepositoryError::NotFound => AppError::NotFound(format!("cart item {id}")),
        other => AppError::Database(other),
    })?;
    show(state).await
}

/// Remove one line. Removing a line that is already gone is not an error.
///
/// # Errors
///
/// Returns `AppError::Database` if the store fails.
#[instrument(skip(state))]
pub async fn remove(state: &AppState, id: CartItemId) -> Result<CartView> {
    state.store().cart().await?.remove(id).await?;
    show(state).await
}

/// Place an order for everything in the cart.
///
/// # Errors
///
/// Returns `AppError::Checkout` if the cart is empty, the email is
/// malformed or the store fails.
#[instrument(skip(state, customer))]
pub async fn checkout(state: &AppState, customer: CheckoutCustomer) -> Result<Order> {
    let order = place_order(
        state.store(),
        customer,
        state.config().shipping_fee,
        state.clock().now(),
    )
    .await?;
    Ok(order)
}

impl fmt::Display for CartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, Route::Cart.title())?;
        if self.items.is_empty() {
            return writeln!(f, "カートは空です");
        }
        for item in &self.items {
            writeln!(
                f,
                "[{}] {} {}  {} x {} = {}",
                item.id,
                item.category.icon(),
                item.name,
                item.price,
                item.quantity,
                item.line_total()
            )?;
        }
        writeln!(f)?;
        writeln!(f, "商品点数: {}点", self.totals.item_count)?;
        writeln!(f, "小計: {}", self.totals.subtotal)?;
        writeln!(f, "送料: {}", self.shipping_fee)?;
        writeln!(f, "合計: {}", self.total)
    }
}
