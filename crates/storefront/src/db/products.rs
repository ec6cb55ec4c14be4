//! Product repository.

use rust_decimal::Decimal;
use sqlx::SqlitePool;

use sakaya_core::{Category, Price, ProductId};

use super::{RepositoryError, decode_json, insert_error};
use crate::models::Product;

const SELECT_PRODUCT: &str = "SELECT id, name, category, price, description, alcohol_percent, image, tags, stock, pairing FROM products";

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    category: String,
    price: i64,
    description: String,
    alcohol_percent: String,
    image: String,
    tags: String,
    stock: i64,
    pairing: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category = row
            .category
            .parse::<Category>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        let alcohol_percent = row.alcohol_percent.parse::<Decimal>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid alcohol_percent: {e}"))
        })?;
        let stock = u32::try_from(row.stock).map_err(|_| {
            RepositoryError::DataCorruption(format!("invalid stock: {}", row.stock))
        })?;
        let pairing = row
            .pairing
            .as_deref()
            .map(|raw| decode_json("pairing", raw))
            .transpose()?;

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            category,
            price: Price::yen(row.price),
            description: row.description,
            alcohol_percent,
            image: row.image,
            tags: decode_json("tags", &row.tags)?,
            stock,
            pairing,
        })
    }
}

/// Repository for the product collection.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get every product ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row cannot be decoded.
    pub async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_PRODUCT} ORDER BY id"))
            .fetch_all(self.pool)
            .await?;
        rows.into_iter().map(Product::try_from).collect()
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row cannot be decoded.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_PRODUCT} WHERE id = ?"))
            .bind(id.as_i64())
            .fetch_optional(self.pool)
            .await?;
        row.map(Product::try_from).transpose()
    }

    /// Get every product in a category, using the category index.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row cannot be decoded.
    pub async fn get_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "{SELECT_PRODUCT} WHERE category = ? ORDER BY id"
        ))
        .bind(category.as_str())
        .fetch_all(self.pool)
        .await?;
        rows.into_iter().map(Product::try_from).collect()
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(&self, product: &Product) -> Result<(), RepositoryError> {
        self.write(product, false).await
    }

    /// Insert or overwrite a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn put(&self, product: &Product) -> Result<(), RepositoryError> {
        self.write(product, true).await
    }

    /// Delete a product by id. Deleting an absent id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Remove every product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM products").execute(self.pool).await?;
        Ok(())
    }

    async fn write(&self, product: &Product, upsert: bool) -> Result<(), RepositoryError> {
        let tags = serde_json::to_string(&product.tags)?;
        let pairing = product
            .pairing
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let sql = if upsert {
            "INSERT INTO products (id, name, category, price, description, alcohol_percent, image, tags, stock, pairing) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (id) DO UPDATE SET name = excluded.name, category = excluded.category, \
             price = excluded.price, description = excluded.description, \
             alcohol_percent = excluded.alcohol_percent, image = excluded.image, \
             tags = excluded.tags, stock = excluded.stock, pairing = excluded.pairing"
        } else {
            "INSERT INTO products (id, name, category, price, description, alcohol_percent, image, tags, stock, pairing) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        };

        sqlx::query(sql)
            .bind(product.id.as_i64())
            .bind(&product.name)
            .bind(product.category.as_str())
            .bind(product.price.amount())
            .bind(&product.description)
            .bind(product.alcohol_percent.to_string())
            .bind(&product.image)
            .bind(tags)
            .bind(i64::from(product.stock))
            .bind(pairing)
            .execute(self.pool)
            .await
            .map_err(|e| insert_error(e, &format!("product {}", product.id)))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::Store;

    fn product(id: i64, category: Category) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product {id}"),
            category,
            price: Price::yen(1000 + id),
            description: "テスト".to_owned(),
            alcohol_percent: Decimal::new(155, 1),
            image: format!("/images/{id}.jpg"),
            tags: vec!["a".to_owned(), "b".to_owned()],
            stock: 3,
            pairing: Some(vec!["刺身".to_owned()]),
        }
    }

    #[tokio::test]
    async fn test_add_then_get_round_trips() {
        let store = Store::in_memory();
        let repo = store.products().await.unwrap();
        let original = product(1, Category::Sake);

        repo.add(&original).await.unwrap();

        assert_eq!(repo.get(original.id).await.unwrap(), Some(original.clone()));
        assert_eq!(repo.get_all().await.unwrap(), vec![original]);
    }

    #[tokio::test]
    async fn test_add_duplicate_is_conflict() {
        let store = Store::in_memory();
        let repo = store.products().await.unwrap();
        repo.add(&product(1, Category::Sake)).await.unwrap();

        let err = repo.add(&product(1, Category::Wine)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_put_upserts() {
        let store = Store::in_memory();
        let repo = store.products().await.unwrap();
        let mut item = product(2, Category::Beer);
        repo.put(&item).await.unwrap();

        item.stock = 0;
        item.pairing = None;
        repo.put(&item).await.unwrap();

        assert_eq!(repo.get(item.id).await.unwrap(), Some(item));
    }

    #[tokio::test]
    async fn test_get_by_category_and_delete() {
        let store = Store::in_memory();
        let repo = store.products().await.unwrap();
        repo.add(&product(1, Category::Sake)).await.unwrap();
        repo.add(&product(2, Category::Wine)).await.unwrap();
        repo.add(&product(3, Category::Wine)).await.unwrap();

        let wines = repo.get_by_category(Category::Wine).await.unwrap();
        assert_eq!(
            wines.iter().map(|p| p.id.as_i64()).collect::<Vec<_>>(),
            [2, 3]
        );

        repo.delete(ProductId::new(2)).await.unwrap();
        repo.delete(ProductId::new(42)).await.unwrap();
        assert_eq!(repo.get_all().await.unwrap().len(), 2);

        repo.clear().await.unwrap();
        assert!(repo.get_all().await.unwrap().is_empty());
    }
}
