//! Demo catalog bootstrap.

use rust_decimal::Decimal;
use serde::Serialize;

use sakaya_core::{Category, Price, ProductId};

use crate::db::{RepositoryError, Store};
use crate::models::Product;

/// How [`seed_catalog`] treats an existing catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Insert only when the product collection is empty.
    #[default]
    IfEmpty,
    /// Upsert every product regardless of what is stored.
    Upsert,
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Number of products written.
    pub inserted: usize,
    /// True when the catalog was already populated and nothing was written.
    pub skipped: bool,
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: i64,
    name: &str,
    category: Category,
    price: i64,
    description: &str,
    alcohol_percent: Decimal,
    image: &str,
    tags: [&str; 3],
    stock: u32,
    pairing: [&str; 3],
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        category,
        price: Price::yen(price),
        description: description.to_owned(),
        alcohol_percent,
        image: image.to_owned(),
        tags: tags.map(str::to_owned).to_vec(),
        stock,
        pairing: Some(pairing.map(str::to_owned).to_vec()),
    }
}

/// The six demo products written on first run.
#[must_use]
pub fn default_catalog() -> Vec<Product> {
    vec![
        product(
            1,
            "純米大吟醸 山田錦",
            Category::Sake,
            3500,
            "山田錦を使用した上品な味わいの純米大吟醸酒",
            Decimal::new(155, 1),
            "/images/sake1.jpg",
            ["日本酒", "純米大吟醸", "山田錦"],
            10,
            ["刺身", "天ぷら", "和食"],
        ),
        product(
            2,
            "本格焼酎 黒霧島",
            Category::Shochu,
            1200,
            "さつまいもの甘みが感じられる本格焼酎",
            Decimal::new(25, 0),
            "/images/shochu1.jpg",
            ["焼酎", "さつまいも", "本格"],
            15,
            ["焼き鳥", "餃子", "鍋料理"],
        ),
        product(
            3,
            "シャルドネ 白ワイン",
            Category::Wine,
            2800,
            "フルーティーで爽やかな白ワイン",
            Decimal::new(12, 0),
            "/images/wine1.jpg",
            ["ワイン", "白ワイン", "シャルドネ"],
            8,
            ["魚料理", "チーズ", "サラダ"],
        ),
        product(
            4,
            "クラフトビール IPA",
            Category::Beer,
            450,
            "ホップの苦味が効いたクラフトビール",
            Decimal::new(65, 1),
            "/images/beer1.jpg",
            ["ビール", "クラフト", "IPA"],
            20,
            ["ピザ", "ハンバーガー", "スパイシー料理"],
        ),
        product(
            5,
            "チーズ盛り合わせ",
            Category::Snack,
            1800,
            "3種類のチーズの盛り合わせ",
            Decimal::ZERO,
            "/images/cheese1.jpg",
            ["おつまみ", "チーズ", "盛り合わせ"],
            12,
            ["ワイン", "日本酒", "ビール"],
        ),
        product(
            6,
            "ナッツミックス",
            Category::Snack,
            680,
            "4種類のナッツをミックスした人気のおつまみ",
            Decimal::ZERO,
            "/images/nuts1.jpg",
            ["おつまみ", "ナッツ", "ミックス"],
            25,
            ["ビール", "ウイスキー", "焼酎"],
        ),
    ]
}

/// Write `catalog` into the product collection.
///
/// With [`SeedMode::IfEmpty`] nothing happens when any product exists;
/// otherwise products are added one at a time. Two concurrent runs against
/// an empty store may both try to insert and one will fail with `Conflict`.
///
/// # Errors
///
/// Returns the first `RepositoryError` hit; products written before it stay.
pub async fn seed_catalog(
    store: &Store,
    catalog: &[Product],
    mode: SeedMode,
) -> Result<SeedReport, RepositoryError> {
    let products = store.products().await?;

    if mode == SeedMode::Upsert {
        for item in catalog {
            products.put(item).await?;
        }
        tracing::info!(count = catalog.len(), "Catalog upserted");
        return Ok(SeedReport {
            inserted: catalog.len(),
            skipped: false,
        });
    }

    if !products.get_all().await?.is_empty() {
        tracing::debug!("Catalog already seeded");
        return Ok(SeedReport {
            inserted: 0,
            skipped: true,
        });
    }

    for item in catalog {
        products.add(item).await?;
    }
    tracing::info!(count = catalog.len(), "Seeded initial catalog");

    Ok(SeedReport {
        inserted: catalog.len(),
        skipped: false,
    })
}

/// Seed the demo catalog if the store has no products yet.
///
/// Called before every page that reads the catalog.
///
/// # Errors
///
/// Returns `RepositoryError` if the store cannot be read or written.
pub async fn ensure_seeded(store: &Store) -> Result<SeedReport, RepositoryError> {
    seed_catalog(store, &default_catalog(), SeedMode::IfEmpty).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_ids_are_unique() {
        let catalog = default_catalog();
        let mut ids: Vec<_> = catalog.iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
        assert_eq!(catalog.len(), 6);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = Store::in_memory();

        let first = ensure_seeded(&store).await.unwrap();
        let second = ensure_seeded(&store).await.unwrap();

        assert_eq!(first, SeedReport { inserted: 6, skipped: false });
        assert_eq!(second, SeedReport { inserted: 0, skipped: true });
        let stored = store.products().await.unwrap().get_all().await.unwrap();
        assert_eq!(stored, default_catalog());
    }

    #[tokio::test]
    async fn test_if_empty_leaves_existing_catalog_alone() {
        let store = Store::in_memory();
        let mut only = default_catalog();
        only.truncate(1);
        seed_catalog(&store, &only, SeedMode::IfEmpty).await.unwrap();

        let report = ensure_seeded(&store).await.unwrap();
        assert!(report.skipped);
        assert_eq!(store.products().await.unwrap().get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_overwrites() {
        let store = Store::in_memory();
        ensure_seeded(&store).await.unwrap();

        let mut catalog = default_catalog();
        catalog[0].price = Price::yen(3900);
        let report = seed_catalog(&store, &catalog, SeedMode::Upsert).await.unwrap();

        assert_eq!(report.inserted, 6);
        let products = store.products().await.unwrap();
        let sake = products.get(ProductId::new(1)).await.unwrap().unwrap();
        assert_eq!(sake.price, Price::yen(3900));
        assert_eq!(products.get_all().await.unwrap().len(), 6);
    }
}
