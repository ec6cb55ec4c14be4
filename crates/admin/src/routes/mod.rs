//! Admin page controllers.
//!
//! ```text
//! /admin/dashboard                 - Stats, recent orders, low stock
//! /admin/dashboard (ship/cancel)   - Order status changes
//! /admin/products                  - Product management
//! ```
//!
//! Every operation takes an [`AdminSession`](crate::session::AdminSession).

pub mod dashboard;
pub mod products;
