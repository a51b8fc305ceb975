//! SmartDeal Hub API library.
//!
//! Catalog search, user registration, wishlists, carts, price alerts and
//! admin analytics over a document store. The binary in `main.rs` wires this
//! up to a listener; the CLI and integration tests reuse it directly.
//!
//! # Stores
//!
//! - `postgres://` URLs use JSONB documents in `PostgreSQL`
//! - `memory://` keeps everything in process (tests and demos)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod query;
pub mod routes;
pub mod services;
pub mod state;

pub use app::app;
