//! User domain types.
//!
//! Identity comes from an external auth provider; `firebase_uid` is that
//! provider's stable id and is unique across users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartdeal_core::{Email, UserId, timestamp};

use super::Schema;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub firebase_uid: String,
    #[serde(with = "smartdeal_core::timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl User {
    /// Build a new user with a fresh id and creation timestamp.
    #[must_use]
    pub fn new(request: UserCreate) -> Self {
        Self {
            id: UserId::generate(),
            email: request.email,
            name: request.name,
            firebase_uid: request.firebase_uid,
            timestamp: timestamp::now(),
        }
    }
}

impl Schema for User {
    const FIELDS: &'static [&'static str] = &["id", "email", "name", "firebaseUid", "timestamp"];
}

/// Body of `POST /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub email: Email,
    pub name: String,
    pub firebase_uid: String,
}

impl Schema for UserCreate {
    const FIELDS: &'static [&'static str] = &["email", "name", "firebaseUid"];
}
