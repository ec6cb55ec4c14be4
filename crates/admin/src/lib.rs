//! Sakaya admin library.
//!
//! Admin login, the dashboard and product management, layered over the
//! storefront's local store.
//!
//! # Security
//!
//! The login is a fixed credential check and the session is a persisted
//! marker with no expiry. It keeps casual visitors out of the dashboard
//! and nothing more.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod session;
