//! Cart entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartdeal_core::{CartItemId, ProductId, UserId, timestamp};

use super::Schema;

/// A product in a user's cart with the retailer they picked. Each
/// (user, product) pair appears at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub selected_store: String,
    #[serde(with = "smartdeal_core::timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl CartItem {
    /// Build a new entry with a fresh id and creation timestamp.
    #[must_use]
    pub fn new(request: CartCreate) -> Self {
        Self {
            id: CartItemId::generate(),
            user_id: request.user_id,
            product_id: request.product_id,
            selected_store: request.selected_store,
            timestamp: timestamp::now(),
        }
    }
}

impl Schema for CartItem {
    const FIELDS: &'static [&'static str] =
        &["id", "userId", "productId", "selectedStore", "timestamp"];
}

/// Body of `POST /api/cart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCreate {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub selected_store: String,
}

impl Schema for CartCreate {
    const FIELDS: &'static [&'static str] = &["userId", "productId", "selectedStore"];
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::test_support::assert_fields_match;

    #[test]
    fn test_fields_match_serialized_shape() {
        let request = CartCreate {
            user_id: UserId::new("u-1"),
            product_id: ProductId::new("p-1"),
            selected_store: "Amazon".to_string(),
        };
        assert_fields_match(&request);
        assert_fields_match(&CartItem::new(request));
    }

    #[test]
    fn test_missing_selected_store_fails() {
        let doc = serde_json::from_value(json!({ "userId": "u", "productId": "p" })).unwrap();
        assert!(CartCreate::from_document(doc).is_err());
    }
}
