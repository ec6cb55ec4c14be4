//! Cart to order conversion.

use chrono::{DateTime, Utc};
use thiserror::Error;

use sakaya_core::{Email, EmailError, OrderId, OrderStatus, Price};

use crate::db::{RepositoryError, Store};
use crate::models::{CartTotals, Order};

/// Flat shipping charged on every order, in yen.
pub const DEFAULT_SHIPPING_FEE: Price = Price::yen(500);

pub const GUEST_NAME: &str = "ゲストユーザー";
pub const GUEST_EMAIL: &str = "guest@example.com";
pub const GUEST_ADDRESS: &str = "住所未設定";

/// Errors that can occur at checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// The contact address is malformed.
    #[error("invalid customer email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Contact details entered at checkout. Missing fields fall back to the
/// guest defaults.
#[derive(Debug, Clone, Default)]
pub struct CheckoutCustomer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub shipping_address: Option<String>,
}

/// Turn the cart into a pending order and empty the cart.
///
/// The total is the cart subtotal plus `shipping_fee`. When the email
/// belongs to a registered user, that user's name is recorded. The order
/// insert and the cart clear commit together.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if there is nothing to order,
/// `CheckoutError::InvalidEmail` for a malformed email and
/// `CheckoutError::Repository` if the store fails; in every case the cart
/// is left unchanged.
pub async fn place_order(
    store: &Store,
    customer: CheckoutCustomer,
    shipping_fee: Price,
    placed_at: DateTime<Utc>,
) -> Result<Order, CheckoutError> {
    let items = store.cart().await?.get_all().await?;
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let email = Email::parse(customer.email.as_deref().unwrap_or(GUEST_EMAIL))?;
    let registered = store.users().await?.get_by_email(&email).await?;
    let customer_name = match registered {
        Some(user) => user.name,
        None => customer.name.unwrap_or_else(|| GUEST_NAME.to_owned()),
    };

    let totals = CartTotals::of(&items);
    let order = Order {
        id: OrderId::from_millis(placed_at.timestamp_millis()),
        customer_name,
        customer_email: email,
        items,
        total: totals.subtotal + shipping_fee,
        status: OrderStatus::Pending,
        date: placed_at.date_naive(),
        shipping_address: customer
            .shipping_address
            .unwrap_or_else(|| GUEST_ADDRESS.to_owned()),
    };

    store.orders().await?.add_clearing_cart(&order).await?;

    tracing::info!(
        order_id = %order.id,
        items = totals.item_count,
        total = order.total.amount(),
        "Order placed"
    );
    Ok(order)
}
