//! Admin product management.

use std::fmt;

use serde::Serialize;
use tracing::instrument;

use sakaya_core::ProductId;
use sakaya_storefront::db::RepositoryError;
use sakaya_storefront::models::Product;
use sakaya_storefront::routes::write_header;
use sakaya_storefront::services::ensure_seeded;
use sakaya_storefront::state::AppState;

use crate::error::{AdminError, Result};
use crate::session::AdminSession;

/// Product management listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProductListView {
    pub products: Vec<Product>,
}

/// List every product.
///
/// # Errors
///
/// Returns `AdminError::Database` if the catalog cannot be read or seeded.
#[instrument(skip(state, _session))]
pub async fn list(state: &AppState, _session: &AdminSession) -> Result<ProductListView> {
    ensure_seeded(state.store()).await?;
    let products = state.store().products().await?.get_all().await?;
    Ok(ProductListView { products })
}

/// Add a new product.
///
/// # Errors
///
/// Returns `AdminError::InvalidProduct` for a negative price, an alcohol
/// percent outside 0 to 100 or an empty name, `AdminError::Conflict` if a
/// product with this id exists and `AdminError::Database` if the store fails.
#[instrument(skip(state, _session, product), fields(product_id = %product.id))]
pub async fn add(state: &AppState, _session: &AdminSession, product: &Product) -> Result<()> {
    product.validate()?;
    state
        .store()
        .products()
        .await?
        .add(product)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(msg) => AdminError::Conflict(msg),
            other => AdminError::Database(other),
        })?;
    tracing::info!(product_id = %product.id, name = %product.name, "Product added");
    Ok(())
}

/// Create or overwrite a product.
///
/// # Errors
///
/// Returns `AdminError::InvalidProduct` for a record [`Product::validate`]
/// refuses and `AdminError::Database` if the store fails.
#[instrument(skip(state, _session, product), fields(product_id = %product.id))]
pub async fn update(state: &AppState, _session: &AdminSession, product: &Product) -> Result<()> {
    product.validate()?;
    state.store().products().await?.put(product).await?;
    tracing::info!(product_id = %product.id, "Product saved");
    Ok(())
}

/// Delete a product. Deleting an unknown id is not an error.
///
/// Cart lines and orders keep their own copies of the product.
///
/// # Errors
///
/// Returns `AdminError::Database` if the store fails.
#[instrument(skip(state, _session))]
pub async fn delete(state: &AppState, _session: &AdminSession, id: ProductId) -> Result<()> {
    state.store().products().await?.delete(id).await?;
    tracing::info!(product_id = %id, "Product deleted");
    Ok(())
}

impl fmt::Display for ProductListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, "商品管理")?;
        for product in &self.products {
            writeln!(
                f,
                "[{}] {} {:<20} {:>8}  在庫 {:>3}",
                product.id,
                product.category.icon(),
                product.name,
                product.price.to_string(),
                product.stock
            )?;
        }
        writeln!(f, "({}件)", self.products.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use secrecy::SecretString;

    use sakaya_core::{Category, Price};

    use super::*;
    use crate::config::AdminConfig;
    use crate::session::login;

    async fn session(state: &AppState) -> AdminSession {
        let config = AdminConfig::from_lookup(|_| None).unwrap();
        login(state, &config, "admin@sake-shop.com", &SecretString::from("admin123"))
            .await
            .unwrap()
    }

    fn umeshu() -> Product {
        Product {
            id: ProductId::new(7),
            name: "梅酒 紀州".to_owned(),
            category: Category::Sake,
            price: Price::yen(1600),
            description: "完熟南高梅を漬け込んだ梅酒".to_owned(),
            alcohol_percent: Decimal::new(12, 0),
            image: "/images/umeshu1.jpg".to_owned(),
            tags: vec!["梅酒".to_owned()],
            stock: 4,
            pairing: None,
        }
    }

    #[tokio::test]
    async fn test_manage_products() {
        let state = AppState::in_memory();
        let session = session(&state).await;
        assert_eq!(list(&state, &session).await.unwrap().products.len(), 6);

        let mut product = umeshu();
        add(&state, &session, &product).await.unwrap();
        assert!(matches!(
            add(&state, &session, &product).await,
            Err(AdminError::Conflict(_))
        ));

        product.stock = 40;
        update(&state, &session, &product).await.unwrap();
        let listed = list(&state, &session).await.unwrap();
        assert_eq!(listed.products.last(), Some(&product));

        delete(&state, &session, product.id).await.unwrap();
        delete(&state, &session, product.id).await.unwrap();
        assert_eq!(list(&state, &session).await.unwrap().products.len(), 6);
    }

    #[tokio::test]
    async fn test_invalid_products_are_not_stored() {
        let state = AppState::in_memory();
        let session = session(&state).await;

        let mut negative = umeshu();
        negative.price = Price::yen(-1600);
        assert!(matches!(
            add(&state, &session, &negative).await,
            Err(AdminError::InvalidProduct(_))
        ));

        let mut strong = umeshu();
        strong.alcohol_percent = Decimal::new(-12, 0);
        assert!(matches!(
            update(&state, &session, &strong).await,
            Err(AdminError::InvalidProduct(_))
        ));

        let products = list(&state, &session).await.unwrap().products;
        assert!(products.iter().all(|p| p.id != negative.id));
    }
}
