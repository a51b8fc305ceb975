//! Core types for SmartDeal Hub.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod timestamp;

pub use email::{Email, EmailError};
pub use id::*;
pub use timestamp::TimestampError;
