//! Catalog seeding command.
//!
//! Loads products from a YAML list, or the built-in demo catalog.
//!
//! ```yaml
//! - id: 7
//!   name: 特別純米 雄町
//!   category: sake
//!   price: 2800
//!   description: 岡山産雄町を使用した旨口の特別純米酒
//!   alcoholPercent: 16
//!   image: /images/sake3.jpg
//!   tags: [特別純米, 雄町, 旨口]
//!   stock: 12
//!   pairing: [焼き鳥, おでん]
//! ```

use std::collections::HashSet;

use tracing::info;

use sakaya_storefront::models::Product;
use sakaya_storefront::services::seeder::default_catalog;
use sakaya_storefront::services::{SeedMode, seed_catalog};

use super::{CliError, open_state};

/// Read a YAML product list, rejecting duplicate ids and invalid fields.
pub(crate) async fn load_products(path: &str) -> Result<Vec<Product>, CliError> {
    let content = tokio::fs::read_to_string(path).await?;
    let products: Vec<Product> = serde_yaml::from_str(&content)?;

    let mut seen = HashSet::new();
    if let Some(dup) = products.iter().find(|p| !seen.insert(p.id)) {
        return Err(CliError::Input(format!(
            "Duplicate product id {} in {path}",
            dup.id
        )));
    }
    for product in &products {
        product
            .validate()
            .map_err(|e| CliError::Input(format!("Product {} in {path}: {e}", product.id)))?;
    }
    Ok(products)
}

/// Seed the catalog. Without `force` an existing catalog is left alone.
pub async fn run(file: Option<&str>, force: bool) -> Result<(), CliError> {
    let catalog = match file {
        Some(path) => {
            info!("Loading products from {path}");
            load_products(path).await?
        }
        None => default_catalog(),
    };
    let mode = if force {
        SeedMode::Upsert
    } else {
        SeedMode::IfEmpty
    };

    let state = open_state()?;
    let report = seed_catalog(state.store(), &catalog, mode).await?;

    if report.skipped {
        info!("Catalog already has products; use --force to overwrite");
    } else {
        info!("Seeding complete!");
        info!("  Products: {}", report.inserted);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> String {
        let path = std::env::temp_dir().join(format!("sakaya-seed-{}-{name}", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_load_products_from_yaml() {
        let path = write_temp(
            "ok.yaml",
            "- id: 7\n  name: 特別純米 雄町\n  category: sake\n  price: 2800\n  description: 旨口\n  alcoholPercent: 16\n  image: /images/sake3.jpg\n  tags: [雄町]\n  stock: 12\n",
        );

        let products = load_products(&path).await.unwrap();

        assert_eq!(products.len(), 1);
        let product = products.first().unwrap();
        assert_eq!(product.name, "特別純米 雄町");
        assert_eq!(product.pairing, None);
    }

    #[tokio::test]
    async fn test_load_products_rejects_duplicate_ids() {
        let entry = "- id: 1\n  name: a\n  category: snack\n  price: 100\n  description: x\n  alcoholPercent: 0\n  image: /a.jpg\n  tags: []\n  stock: 1\n";
        let path = write_temp("dup.yaml", &format!("{entry}{entry}"));

        assert!(matches!(
            load_products(&path).await,
            Err(CliError::Input(_))
        ));
    }

    #[tokio::test]
    async fn test_load_products_rejects_out_of_range_values() {
        let negative_price = "- id: 1\n  name: a\n  category: snack\n  price: -100\n  description: x\n  alcoholPercent: 0\n  image: /a.jpg\n  tags: []\n  stock: 1\n";
        let negative_abv = "- id: 2\n  name: b\n  category: sake\n  price: 100\n  description: x\n  alcoholPercent: -15\n  image: /b.jpg\n  tags: []\n  stock: 1\n";

        for (name, yaml) in [("price.yaml", negative_price), ("abv.yaml", negative_abv)] {
            let path = write_temp(name, yaml);
            assert!(matches!(
                load_products(&path).await,
                Err(CliError::Input(_))
            ));
        }
    }
}
