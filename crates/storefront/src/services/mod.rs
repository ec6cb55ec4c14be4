//! Storefront business logic.
//!
//! # Services
//!
//! - `seeder` - Demo catalog bootstrap (idempotent)
//! - `diagnosis` - Question table and scoring
//! - `random` - Random suggestion picker
//! - `checkout` - Cart to order conversion
//! - `clock` - Monotonic millisecond clock for generated keys

pub mod checkout;
pub mod clock;
pub mod diagnosis;
pub mod random;
pub mod seeder;

pub use checkout::{CheckoutCustomer, CheckoutError, place_order};
pub use clock::MonotonicClock;
pub use diagnosis::{DiagnosisError, QUESTIONS};
pub use random::RandomPicker;
pub use seeder::{SeedMode, SeedReport, ensure_seeded, seed_catalog};
