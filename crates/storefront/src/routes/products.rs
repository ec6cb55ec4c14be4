//! Product listing and add-to-cart.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use sakaya_core::{CartItemId, Category, ProductId};

use super::{Route, write_header};
use crate::error::{AppError, Result};
use crate::models::{CartItem, Product};
use crate::services::ensure_seeded;
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductsQuery {
    /// `None` shows every category.
    pub category: Option<Category>,
    /// Free-text search over name, description and tags.
    pub search: Option<String>,
}

/// Product listing view.
#[derive(Debug, Clone, Serialize)]
pub struct ProductsView {
    pub category: Option<Category>,
    pub search: String,
    pub products: Vec<Product>,
}

/// Display the filtered catalog.
///
/// # Errors
///
/// Returns `AppError::Database` if the catalog cannot be read or seeded.
#[instrument(skip(state))]
pub async fn index(state: &AppState, query: ProductsQuery) -> Result<ProductsView> {
    ensure_seeded(state.store()).await?;
    let products = state.store().products().await?;
    let candidates = match query.category {
        Some(category) => products.get_by_category(category).await?,
        None => products.get_all().await?,
    };

    let search = query.search.unwrap_or_default();
    let products = candidates
        .into_iter()
        .filter(|product| product.matches_search(&search))
        .collect();

    Ok(ProductsView {
        category: query.category,
        search,
        products,
    })
}

/// Put one unit of a product into the cart as a new line.
///
/// The product's name, price, image and category are copied into the line.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown product and
/// `AppError::Database` if the store fails.
#[instrument(skip(state))]
pub async fn add_to_cart(state: &AppState, product_id: ProductId) -> Result<CartItem> {
    ensure_seeded(state.store()).await?;
    let product = state
        .store()
        .products()
        .await?
        .get(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let item = CartItem::snapshot(CartItemId::new(state.clock().now_millis()), &product);
    state.store().cart().await?.add(&item).await?;

    tracing::info!(product_id = %product.id, cart_item_id = %item.id, "Added to cart");
    Ok(item)
}

impl fmt::Display for ProductsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, Route::Products.title())?;
        let category = self.category.map_or("すべて", |c| c.display_name());
        write!(f, "カテゴリー: {category}")?;
        if !self.search.is_empty() {
            write!(f, " / 検索: {}", self.search)?;
        }
        writeln!(f, " ({}件)", self.products.len())?;
        writeln!(f)?;

        if self.products.is_empty() {
            return writeln!(f, "該当する商品が見つかりませんでした");
        }
        for product in &self.products {
            writeln!(
                f,
                "[{}] {} {}  {}  {}%  在庫 {}",
                product.id,
                product.category.icon(),
                product.name,
                product.price,
                product.alcohol_percent,
                product.stock
            )?;
            writeln!(f, "    {}", product.description)?;
            writeln!(f, "    #{}", product.tags.join(" #"))?;
        }
        Ok(())
    }
}
