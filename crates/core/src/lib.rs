//! Sakaya Core - Shared types library.
//!
//! This crate provides common types used across all Sakaya components:
//! - `storefront` - Local store, catalog, cart, diagnosis and random pages
//! - `admin` - Admin login, dashboard and product management
//! - `cli` - The `sakaya` command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access.
//! Repositories bind the raw values (`as_i64`, `as_str`) themselves.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, categories and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
