//! Page controllers for the storefront.
//!
//! Each page reads or writes the local store and returns a view that
//! serializes to JSON and renders as plain text through `Display`.
//!
//! # Route Structure
//!
//! ```text
//! /                 - Home page
//! /products         - Catalog with category filter and search
//! /cart             - Cart, quantity changes, checkout
//! /diagnosis        - お酒診断 questions and results
//! /random           - Random suggestion
//! /admin            - Admin login (sakaya-admin)
//! /admin/dashboard  - Admin dashboard (sakaya-admin)
//! ```

pub mod cart;
pub mod diagnosis;
pub mod home;
pub mod products;
pub mod random;

use std::fmt;

use serde::Serialize;

/// Every page of the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
    Products,
    Cart,
    Diagnosis,
    Random,
    Admin,
    AdminDashboard,
}

impl Route {
    /// Pages listed in the site navigation.
    pub const NAV: [Self; 5] = [
        Self::Products,
        Self::Diagnosis,
        Self::Random,
        Self::Cart,
        Self::Admin,
    ];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Products => "/products",
            Self::Cart => "/cart",
            Self::Diagnosis => "/diagnosis",
            Self::Random => "/random",
            Self::Admin => "/admin",
            Self::AdminDashboard => "/admin/dashboard",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "ホーム",
            Self::Products => "商品一覧",
            Self::Cart => "カート",
            Self::Diagnosis => "お酒診断",
            Self::Random => "ランダム提案",
            Self::Admin => "管理者",
            Self::AdminDashboard => "管理者ダッシュボード",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Write the shared page header.
///
/// # Errors
///
/// Propagates formatter errors.
pub fn write_header(f: &mut fmt::Formatter<'_>, heading: &str) -> fmt::Result {
    writeln!(f, "🍶 酒屋 | {heading}")?;
    writeln!(f, "{}", "=".repeat(40))
}
