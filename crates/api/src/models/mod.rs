//! Entity schemas and request bodies.
//!
//! Every schema declares the allow-list of JSON fields it accepts. Both stored
//! documents and request bodies are projected onto that list before typed
//! deserialization, so unknown keys are dropped rather than rejected.

pub mod analytics;
pub mod cart;
pub mod price_alert;
pub mod product;
pub mod user;
pub mod wishlist;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::db::{Document, project};

pub use analytics::{Activity, Analytics, BrandCount};
pub use cart::{CartCreate, CartItem};
pub use price_alert::{PriceAlert, PriceAlertCreate};
pub use product::Product;
pub use user::{User, UserCreate};
pub use wishlist::{WishlistCreate, WishlistItem};

/// A record shape with an explicit field allow-list.
pub trait Schema: DeserializeOwned {
    /// JSON field names this schema reads. Everything else is dropped.
    const FIELDS: &'static [&'static str];

    /// Project a document onto [`Self::FIELDS`] and deserialize it.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if a field is missing or has the wrong
    /// shape.
    fn from_document(document: Document) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(project(document, Self::FIELDS)))
    }
}

/// Serialize an entity into the document form the store persists.
///
/// # Errors
///
/// Returns `serde_json::Error` if the value does not serialize to a JSON
/// object.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// `{"message": ...}` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn default_true() -> bool {
    true
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_to_document_rejects_non_objects() {
        assert!(to_document(&vec![1, 2, 3]).is_err());
        assert_eq!(
            to_document(&MessageResponse::new("hi")).unwrap().get("message"),
            Some(&json!("hi"))
        );
    }
}
