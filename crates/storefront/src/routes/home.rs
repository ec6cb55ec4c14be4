//! Home page.

use std::fmt;

use serde::Serialize;
use tracing::instrument;

use super::{Route, write_header};
use crate::error::Result;
use crate::models::Product;
use crate::services::ensure_seeded;
use crate::state::AppState;

/// Number of catalog products shown under おすすめ商品.
pub const FEATURED_COUNT: usize = 4;

/// A selling point shown on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feature {
    pub icon: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

const FEATURES: [Feature; 3] = [
    Feature {
        icon: "🍶",
        title: "厳選されたお酒",
        body: "日本酒、焼酎、ワイン、ビールなど、厳選されたお酒を取り揃えています。",
    },
    Feature {
        icon: "🥜",
        title: "こだわりのおつまみ",
        body: "お酒に合う美味しいおつまみを豊富に取り揃えています。",
    },
    Feature {
        icon: "🎯",
        title: "お酒診断",
        body: "あなたの好みに合ったお酒を診断機能で見つけることができます。",
    },
];

/// Home page view.
#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub headline: &'static str,
    pub tagline: &'static str,
    pub nav: Vec<Route>,
    pub features: Vec<Feature>,
    pub featured: Vec<Product>,
}

/// Display the home page.
///
/// # Errors
///
/// Returns `AppError::Database` if the catalog cannot be read or seeded.
#[instrument(skip(state))]
pub async fn show(state: &AppState) -> Result<HomeView> {
    ensure_seeded(state.store()).await?;
    let mut featured = state.store().products().await?.get_all().await?;
    featured.truncate(FEATURED_COUNT);

    Ok(HomeView {
        headline: "お酒とおつまみの専門店",
        tagline: "厳選されたお酒とおつまみをお届けします。お酒診断でぴったりの一本を見つけよう！",
        nav: Route::NAV.to_vec(),
        features: FEATURES.to_vec(),
        featured,
    })
}

impl fmt::Display for HomeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, Route::Home.title())?;
        writeln!(f, "{}", self.headline)?;
        writeln!(f, "{}", self.tagline)?;
        writeln!(f)?;
        for route in &self.nav {
            writeln!(f, "  {:<16} {}", route.path(), route.title())?;
        }
        writeln!(f)?;
        for feature in &self.features {
            writeln!(f, "{} {}", feature.icon, feature.title)?;
            writeln!(f, "   {}", feature.body)?;
        }
        writeln!(f)?;
        writeln!(f, "おすすめ商品")?;
        for product in &self.featured {
            writeln!(
                f,
                "  {} {} {}",
                product.category.icon(),
                product.name,
                product.price
            )?;
        }
        Ok(())
    }
}
