//! Order repository.

use chrono::NaiveDate;
use sqlx::{Executor, Sqlite, SqlitePool};

use sakaya_core::{Email, OrderId, OrderStatus, Price};

use super::{RepositoryError, decode_json, insert_error};
use crate::models::Order;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: String,
    customer_name: String,
    customer_email: String,
    items: String,
    total: i64,
    status: String,
    date: String,
    shipping_address: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let customer_email = Email::parse(&row.customer_email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let status = row
            .status
            .parse::<OrderStatus>()
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
        let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid order date: {e}")))?;

        Ok(Self {
            id: OrderId::new(row.id),
            customer_name: row.customer_name,
            customer_email,
            items: decode_json("items", &row.items)?,
            total: Price::yen(row.total),
            status,
            date,
            shipping_address: row.shipping_address,
        })
    }
}

async fn insert_order<'e, E>(executor: E, order: &Order) -> Result<(), RepositoryError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let items = serde_json::to_string(&order.items)?;
    sqlx::query(
        "INSERT INTO orders (id, customer_name, customer_email, items, total, status, date, shipping_address) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(order.id.as_str())
    .bind(&order.customer_name)
    .bind(order.customer_email.as_str())
    .bind(items)
    .bind(order.total.amount())
    .bind(order.status.as_str())
    .bind(order.date.format(DATE_FORMAT).to_string())
    .bind(&order.shipping_address)
    .execute(executor)
    .await
    .map_err(|e| insert_error(e, &format!("order {}", order.id)))?;
    Ok(())
}

/// Repository for the order collection.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get every order in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row cannot be decoded.
    pub async fn get_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, customer_name, customer_email, items, total, status, date, shipping_address \
             FROM orders ORDER BY rowid",
        )
        .fetch_all(self.pool)
        .await?;
        rows.into_iter().map(Order::try_from).collect()
    }

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the row cannot be decoded.
    pub async fn get(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, customer_name, customer_email, items, total, status, date, shipping_address \
             FROM orders WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;
        row.map(Order::try_from).transpose()
    }

    /// Insert a new order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(&self, order: &Order) -> Result<(), RepositoryError> {
        insert_order(self.pool, order).await
    }

    /// Insert an order and empty the cart in one transaction.
    ///
    /// Either both happen or neither does.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order id already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_clearing_cart(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        insert_order(&mut *tx, order).await?;
        sqlx::query("DELETE FROM cart").execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Overwrite the status of an existing order.
    ///
    /// Read and write happen in one transaction. Any status value is
    /// accepted; transition rules belong to the caller.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this id; the
    /// collection is left untouched.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current: Option<String> = sqlx::query_scalar("SELECT status FROM orders WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&mut *tx)
            .await?;
        if current.is_none() {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(order_id = %id, %status, "Order status updated");
        Ok(())
    }
}
