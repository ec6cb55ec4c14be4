//! Admin dashboard.

use std::fmt;

use serde::Serialize;
use tracing::instrument;

use sakaya_core::{OrderId, OrderStatus, Price};
use sakaya_storefront::db::RepositoryError;
use sakaya_storefront::models::{Order, Product};
use sakaya_storefront::routes::{Route, write_header};
use sakaya_storefront::services::ensure_seeded;
use sakaya_storefront::state::AppState;

use crate::config::AdminConfig;
use crate::error::{AdminError, Result};
use crate::session::AdminSession;

/// Number of orders listed under 最近の注文.
pub const RECENT_ORDER_COUNT: usize = 5;

/// Headline figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_orders: usize,
    /// Sum of order totals, shipping included.
    pub total_revenue: Price,
    pub pending_orders: usize,
}

impl DashboardStats {
    #[must_use]
    pub fn compute(products: &[Product], orders: &[Order]) -> Self {
        Self {
            total_products: products.len(),
            total_orders: orders.len(),
            total_revenue: orders.iter().map(|order| order.total).sum(),
            pending_orders: orders
                .iter()
                .filter(|order| order.status == OrderStatus::Pending)
                .count(),
        }
    }
}

/// Dashboard view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub recent_orders: Vec<Order>,
    pub low_stock: Vec<Product>,
    pub low_stock_threshold: u32,
}

/// Most recent orders by date, newest first.
///
/// Orders placed on the same day are ordered by order number, newest
/// first.
#[must_use]
pub fn recent_orders(mut orders: Vec<Order>, limit: usize) -> Vec<Order> {
    orders.sort_by(|a, b| (b.date, b.id.as_str()).cmp(&(a.date, a.id.as_str())));
    orders.truncate(limit);
    orders
}

/// Load the dashboard.
///
/// # Errors
///
/// Returns `AdminError::Database` if the store cannot be read or seeded.
#[instrument(skip(state, config, _session))]
pub async fn show(
    state: &AppState,
    config: &AdminConfig,
    _session: &AdminSession,
) -> Result<DashboardView> {
    ensure_seeded(state.store()).await?;
    let products = state.store().products().await?.get_all().await?;
    let orders = state.store().orders().await?.get_all().await?;

    let stats = DashboardStats::compute(&products, &orders);
    let low_stock = products
        .into_iter()
        .filter(|product| product.stock <= config.low_stock_threshold)
        .collect();

    Ok(DashboardView {
        stats,
        recent_orders: recent_orders(orders, RECENT_ORDER_COUNT),
        low_stock,
        low_stock_threshold: config.low_stock_threshold,
    })
}

/// Move a pending order to `next`.
///
/// Only pending → shipped and pending → cancelled are offered.
///
/// # Errors
///
/// Returns `AdminError::NotFound` for an unknown order,
/// `AdminError::InvalidTransition` for any other change and
/// `AdminError::Database` if the store fails.
#[instrument(skip(state, _session))]
pub async fn update_order_status(
    state: &AppState,
    _session: &AdminSession,
    order_id: &OrderId,
    next: OrderStatus,
) -> Result<Order> {
    let orders = state.store().orders().await?;
    let mut order = orders
        .get(order_id)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("order {order_id}")))?;

    if !order.status.can_transition_to(next) {
        return Err(AdminError::InvalidTransition {
            from: order.status,
            to: next,
        });
    }

    orders
        .update_status(order_id, next)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AdminError::NotFound(format!("order {order_id}")),
            other => AdminError::Database(other),
        })?;

    tracing::info!(order_id = %order_id, from = %order.status, to = %next, "Order status changed");
    order.status = next;
    Ok(order)
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, Route::AdminDashboard.title())?;
        writeln!(f, "総商品数:   {}", self.stats.total_products)?;
        writeln!(f, "総注文数:   {}", self.stats.total_orders)?;
        writeln!(f, "総売上:     {}", self.stats.total_revenue)?;
        writeln!(f, "未処理注文: {}", self.stats.pending_orders)?;

        writeln!(f)?;
        writeln!(f, "最近の注文")?;
        if self.recent_orders.is_empty() {
            writeln!(f, "  注文はありません")?;
        }
        for order in &self.recent_orders {
            writeln!(
                f,
                "  {}  {}  {}  {}  [{}]",
                order.id,
                order.date,
                order.customer_name,
                order.total,
                order.status.label()
            )?;
        }

        writeln!(f)?;
        writeln!(f, "在庫不足商品 (在庫{}個以下)", self.low_stock_threshold)?;
        if self.low_stock.is_empty() {
            writeln!(f, "  在庫不足の商品はありません")?;
        }
        for product in &self.low_stock {
            writeln!(f, "  [{}] {}  在庫 {}", product.id, product.name, product.stock)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use secrecy::SecretString;

    use sakaya_core::{Email, ProductId};
    use sakaya_storefront::routes::{cart, products};
    use sakaya_storefront::services::CheckoutCustomer;

    use super::*;
    use crate::session::login;

    async fn logged_in(state: &AppState, config: &AdminConfig) -> AdminSession {
        login(state, config, "admin@sake-shop.com", &SecretString::from("admin123"))
            .await
            .unwrap()
    }

    async fn place(state: &AppState, product: i64) -> Order {
        products::add_to_cart(state, ProductId::new(product))
            .await
            .unwrap();
        cart::checkout(state, CheckoutCustomer::default())
            .await
            .unwrap()
    }

    fn order(id: &str, date: (i32, u32, u32)) -> Order {
        Order {
            id: OrderId::new(id),
            customer_name: String::new(),
            customer_email: Email::parse("guest@example.com").unwrap(),
            items: Vec::new(),
            total: Price::yen(1000),
            status: OrderStatus::Pending,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            shipping_address: String::new(),
        }
    }

    #[test]
    fn test_recent_orders_newest_first() {
        let orders = vec![
            order("ORD-1", (2026, 1, 5)),
            order("ORD-2", (2026, 3, 1)),
            order("ORD-3", (2025, 12, 31)),
            order("ORD-4", (2026, 3, 1)),
            order("ORD-5", (2026, 2, 14)),
            order("ORD-6", (2026, 1, 6)),
        ];

        let recent = recent_orders(orders, RECENT_ORDER_COUNT);

        let ids: Vec<_> = recent.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["ORD-4", "ORD-2", "ORD-5", "ORD-6", "ORD-1"]);
    }

    #[tokio::test]
    async fn test_stats_and_low_stock() {
        let state = AppState::in_memory();
        let config = AdminConfig::from_lookup(|key| {
            (key == "SAKAYA_LOW_STOCK_THRESHOLD").then(|| "10".to_owned())
        })
        .unwrap();
        let session = logged_in(&state, &config).await;

        let first = place(&state, 4).await;
        place(&state, 6).await;
        update_order_status(&state, &session, &first.id, OrderStatus::Shipped)
            .await
            .unwrap();

        let view = show(&state, &config, &session).await.unwrap();

        assert_eq!(
            view.stats,
            DashboardStats {
                total_products: 6,
                total_orders: 2,
                total_revenue: Price::yen(450 + 500 + 680 + 500),
                pending_orders: 1,
            }
        );
        assert_eq!(view.recent_orders.len(), 2);
        let low: Vec<_> = view.low_stock.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(low, [1, 3]);
        assert!(view.to_string().contains("¥2,130"));
    }

    #[tokio::test]
    async fn test_default_threshold_flags_nothing_in_demo_catalog() {
        let state = AppState::in_memory();
        let config = AdminConfig::from_lookup(|_| None).unwrap();
        let session = logged_in(&state, &config).await;

        let view = show(&state, &config, &session).await.unwrap();
        assert!(view.low_stock.is_empty());
        assert_eq!(view.stats.total_revenue, Price::ZERO);
    }

    #[tokio::test]
    async fn test_status_transitions() {
        let state = AppState::in_memory();
        let config = AdminConfig::from_lookup(|_| None).unwrap();
        let session = logged_in(&state, &config).await;
        let shipped = place(&state, 1).await;
        let cancelled = place(&state, 2).await;

        let updated = update_order_status(&state, &session, &shipped.id, OrderStatus::Shipped)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Shipped);
        update_order_status(&state, &session, &cancelled.id, OrderStatus::Cancelled)
            .await
            .unwrap();

        let err = update_order_status(&state, &session, &shipped.id, OrderStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AdminError::InvalidTransition {
                from: OrderStatus::Shipped,
                to: OrderStatus::Cancelled
            }
        ));

        let err = update_order_status(
            &state,
            &session,
            &OrderId::new("ORD-404"),
            OrderStatus::Shipped,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AdminError::NotFound(_)));

        let stored = state
            .store()
            .orders()
            .await
            .unwrap()
            .get(&shipped.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, OrderStatus::Shipped);
    }

    #[tokio::test]
    async fn test_pending_cannot_jump_to_delivered() {
        let state = AppState::in_memory();
        let config = AdminConfig::from_lookup(|_| None).unwrap();
        let session = logged_in(&state, &config).await;
        let placed = place(&state, 3).await;

        let err = update_order_status(&state, &session, &placed.id, OrderStatus::Delivered)
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::InvalidTransition { .. }));
    }
}
