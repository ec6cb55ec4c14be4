//! Cart repository.

use sqlx::SqlitePool;

use sakaya_core::{CartItemId, Category, Price, ProductId};

use super::{RepositoryError, insert_error};
use crate::models::CartItem;

#[derive(sqlx::FromRow)]
struct CartRow {
    id: i64,
    product_id: i64,
    name: String,
    price: i64,
    quantity: i64,
    image: String,
    category: String,
}

impl TryFrom<CartRow> for CartItem {
    type Error = RepositoryError;

    fn try_from(row: CartRow) -> Result<Self, Self::Error> {
        let category = row
            .category
            .parse::<Category>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        let quantity = u32::try_from(row.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!("invalid quantity: {}", row.quantity))
        })?;

        Ok(Self {
            id: CartItemId::new(row.id),
            product_id: ProductId::new(row.product_id),
            name: row.name,
            price: Price::yen(row.price),
            quantity,
            image: row.image,
            category,
        })
    }
}

/// Repository for the cart collection.
pub struct CartRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get every cart line in insertion (id) order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row cannot be decoded.
    pub async fn get_all(&self) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartRow>(
            "SELECT id, product_id, name, price, quantity, image, category FROM cart ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;
        rows.into_iter().map(CartItem::try_from).collect()
    }

    /// Insert a new cart line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(&self, item: &CartItem) -> Result<(), RepositoryError> {
        self.write(item, false).await
    }

    /// Insert or overwrite a cart line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn put(&self, item: &CartItem) -> Result<(), RepositoryError> {
        self.write(item, true).await
    }

    /// Set the quantity of one line in a single statement.
    ///
    /// Only the addressed row is touched; other lines keep whatever is
    /// stored for them.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no line has this id.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_quantity(&self, id: CartItemId, quantity: u32) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE cart SET quantity = ? WHERE id = ?")
            .bind(i64::from(quantity))
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Remove a line. Removing an absent id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove(&self, id: CartItemId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart").execute(self.pool).await?;
        Ok(())
    }

    async fn write(&self, item: &CartItem, upsert: bool) -> Result<(), RepositoryError> {
        let sql = if upsert {
            "INSERT OR REPLACE INTO cart (id, product_id, name, price, quantity, image, category) \
             VALUES (?, ?, ?, ?, ?, ?, ?)"
        } else {
            "INSERT INTO cart (id, product_id, name, price, quantity, image, category) \
             VALUES (?, ?, ?, ?, ?, ?, ?)"
        };

        sqlx::query(sql)
            .bind(item.id.as_i64())
            .bind(item.product_id.as_i64())
            .bind(&item.name)
            .bind(item.price.amount())
            .bind(i64::from(item.quantity))
            .bind(&item.image)
            .bind(item.category.as_str())
            .execute(self.pool)
            .await
            .map_err(|e| insert_error(e, &format!("cart item {}", item.id)))?;
        Ok(())
    }
}
