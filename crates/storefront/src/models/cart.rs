//! Cart line items.

use serde::{Deserialize, Serialize};

use sakaya_core::{CartItemId, Category, Price, ProductId};

use super::Product;

/// A cart line.
///
/// Name, price, image and category are copied from the product when the
/// line is created and are never re-joined against the catalog, so a later
/// price change does not affect items already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    pub image: String,
    pub category: Category,
}

impl CartItem {
    /// Snapshot `product` into a new line with quantity one.
    #[must_use]
    pub fn snapshot(id: CartItemId, product: &Product) -> Self {
        Self {
            id,
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
            image: product.image.clone(),
            category: product.category,
        }
    }

    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

/// Aggregate figures shown under the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of quantities.
    pub item_count: u32,
    /// Sum of price times quantity, before shipping.
    pub subtotal: Price,
}

impl CartTotals {
    #[must_use]
    pub fn of(items: &[CartItem]) -> Self {
        Self {
            item_count: items.iter().map(|item| item.quantity).sum(),
            subtotal: items.iter().map(CartItem::line_total).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_snapshot_copies_product_fields() {
        let product = Product {
            id: ProductId::new(3),
            name: "シャルドネ 白ワイン".to_owned(),
            category: Category::Wine,
            price: Price::yen(2800),
            description: String::new(),
            alcohol_percent: Decimal::new(12, 0),
            image: "/images/wine1.jpg".to_owned(),
            tags: Vec::new(),
            stock: 8,
            pairing: None,
        };
        let item = CartItem::snapshot(CartItemId::new(99), &product);
        assert_eq!(item.product_id, product.id);
        assert_eq!(item.price, Price::yen(2800));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.category, Category::Wine);
    }

    #[test]
    fn test_totals() {
        let line = |id, price, quantity| CartItem {
            id: CartItemId::new(id),
            product_id: ProductId::new(id),
            name: String::new(),
            price: Price::yen(price),
            quantity,
            image: String::new(),
            category: Category::Snack,
        };
        let totals = CartTotals::of(&[line(1, 680, 2), line(2, 1800, 1)]);
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.subtotal, Price::yen(3160));
        assert_eq!(CartTotals::of(&[]), CartTotals::default());
    }
}
