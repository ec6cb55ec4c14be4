//! End-to-end storefront tests: catalog, cart and checkout.

#![allow(clippy::unwrap_used)]

use sakaya_core::{Category, Email, OrderStatus, Price, ProductId};
use sakaya_integration_tests::{TempDatabase, TestContext};
use sakaya_storefront::error::AppError;
use sakaya_storefront::routes::{cart, home, products};
use sakaya_storefront::services::{CheckoutCustomer, CheckoutError};

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_first_visit_seeds_catalog_once() {
    let ctx = TestContext::new().unwrap();

    let home = home::show(&ctx.state).await.unwrap();
    assert_eq!(home.featured.len(), home::FEATURED_COUNT);

    // A second page visit must not seed again.
    let listing = products::index(&ctx.state, products::ProductsQuery::default())
        .await
        .unwrap();
    let ids: Vec<i64> = listing.products.iter().map(|p| p.id.as_i64()).collect();
    assert_eq!(ids, [1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_category_filter_and_search() {
    let ctx = TestContext::new().unwrap();

    let snacks = products::index(
        &ctx.state,
        products::ProductsQuery {
            category: Some(Category::Snack),
            search: None,
        },
    )
    .await
    .unwrap();
    assert!(snacks.products.iter().all(|p| p.category == Category::Snack));
    assert_eq!(snacks.products.len(), 2);

    let ipa = products::index(
        &ctx.state,
        products::ProductsQuery {
            category: None,
            search: Some("ipa".to_owned()),
        },
    )
    .await
    .unwrap();
    assert_eq!(ipa.products.len(), 1);
    assert!(ipa.products.iter().all(|p| p.id == ProductId::new(4)));
}

// ============================================================================
// Cart and checkout
// ============================================================================

#[tokio::test]
async fn test_checkout_total_is_subtotal_plus_shipping() {
    let ctx = TestContext::new().unwrap();
    let sake = products::add_to_cart(&ctx.state, ProductId::new(1)).await.unwrap();
    products::add_to_cart(&ctx.state, ProductId::new(4)).await.unwrap();
    cart::update_quantity(&ctx.state, sake.id, 2).await.unwrap();

    let view = cart::show(&ctx.state).await.unwrap();
    assert_eq!(view.totals.item_count, 3);
    assert_eq!(view.totals.subtotal, Price::yen(3500 * 2 + 450));
    assert_eq!(view.total, Price::yen(7450 + 500));

    let order = cart::checkout(&ctx.state, CheckoutCustomer::default())
        .await
        .unwrap();

    assert_eq!(order.total, Price::yen(7950));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 2);
    assert!(order.id.as_str().starts_with("ORD-"));

    let after = cart::show(&ctx.state).await.unwrap();
    assert!(after.items.is_empty());
    assert_eq!(after.total, Price::ZERO);

    let stored = ctx.state.store().orders().await.unwrap().get_all().await.unwrap();
    assert_eq!(stored, vec![order]);
}

#[tokio::test]
async fn test_checkout_uses_registered_name() {
    let ctx = TestContext::new().unwrap();
    let email = Email::parse("taro@example.com").unwrap();
    ctx.register(&email, "山田 太郎").await.unwrap();
    products::add_to_cart(&ctx.state, ProductId::new(2)).await.unwrap();

    let order = cart::checkout(
        &ctx.state,
        CheckoutCustomer {
            name: None,
            email: Some(" taro@example.com ".to_owned()),
            shipping_address: Some("東京都千代田区1-1".to_owned()),
        },
    )
    .await
    .unwrap();

    assert_eq!(order.customer_name, "山田 太郎");
    assert_eq!(order.customer_email, email);
    assert_eq!(order.shipping_address, "東京都千代田区1-1");
}

#[tokio::test]
async fn test_empty_cart_checkout_is_rejected() {
    let ctx = TestContext::new().unwrap();

    let err = cart::checkout(&ctx.state, CheckoutCustomer::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Checkout(CheckoutError::EmptyCart)));
    let orders = ctx.state.store().orders().await.unwrap().get_all().await.unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn test_zero_quantity_removes_line() {
    let ctx = TestContext::new().unwrap();
    let first = products::add_to_cart(&ctx.state, ProductId::new(5)).await.unwrap();
    let second = products::add_to_cart(&ctx.state, ProductId::new(5)).await.unwrap();
    assert_ne!(first.id, second.id);

    let view = cart::update_quantity(&ctx.state, first.id, 0).await.unwrap();

    assert_eq!(view.items.len(), 1);
    assert!(view.items.iter().all(|item| item.id == second.id));
}

#[tokio::test]
async fn test_cart_survives_reopen() {
    let db = TempDatabase::new();
    {
        let ctx = TestContext::with_file(&db).unwrap();
        products::add_to_cart(&ctx.state, ProductId::new(3)).await.unwrap();
    }

    let ctx = TestContext::with_file(&db).unwrap();
    let view = cart::show(&ctx.state).await.unwrap();

    assert_eq!(view.items.len(), 1);
    assert!(view.items.iter().all(|item| item.product_id == ProductId::new(3)));
}
