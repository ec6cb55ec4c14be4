//! Orders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use sakaya_core::{Email, OrderId, OrderStatus, Price};

use super::CartItem;

/// A placed order with the cart lines it was created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_email: Email,
    pub items: Vec<CartItem>,
    /// Items plus shipping.
    pub total: Price,
    pub status: OrderStatus,
    /// Calendar date (UTC) the order was placed.
    pub date: NaiveDate,
    pub shipping_address: String,
}
