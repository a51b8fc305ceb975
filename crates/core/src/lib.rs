//! SmartDeal Core - Shared types library.
//!
//! This crate provides common types used across all SmartDeal Hub components:
//! - `api` - The catalog and personalization HTTP backend
//! - `cli` - Command-line tools for migrations, seeding and reporting
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails, plus the
//!   canonical timestamp representation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

#[doc(hidden)]
pub mod __private {
    pub use uuid;
}
