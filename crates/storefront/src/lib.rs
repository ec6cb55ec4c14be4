//! Sakaya storefront library.
//!
//! Local store, catalog seeding, diagnosis, random suggestions, cart and
//! checkout. Pages are plain async functions over an [`state::AppState`];
//! the `sakaya` binary in `sakaya-cli` drives them.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
