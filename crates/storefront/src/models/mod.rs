//! Domain models for the storefront.
//!
//! These are validated domain objects; the repositories in [`crate::db`]
//! convert them to and from database rows.

pub mod cart;
pub mod diagnosis;
pub mod order;
pub mod product;
pub mod suggestion;
pub mod user;

pub use cart::{CartItem, CartTotals};
pub use diagnosis::{DiagnosisRecord, NewDiagnosisRecord};
pub use order::Order;
pub use product::{InvalidProduct, Product};
pub use suggestion::{RandomHistoryEntry, Suggestion};
pub use user::User;
