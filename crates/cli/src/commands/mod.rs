//! CLI command implementations.

pub mod analytics;
pub mod migrate;
pub mod seed;
