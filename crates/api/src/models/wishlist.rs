//! Wishlist entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartdeal_core::{ProductId, UserId, WishlistItemId, timestamp};

use super::Schema;

/// A product saved to a user's wishlist. Each (user, product) pair appears
/// at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: WishlistItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    #[serde(with = "smartdeal_core::timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl WishlistItem {
    /// Build a new entry with a fresh id and creation timestamp.
    #[must_use]
    pub fn new(request: WishlistCreate) -> Self {
        Self {
            id: WishlistItemId::generate(),
            user_id: request.user_id,
            product_id: request.product_id,
            timestamp: timestamp::now(),
        }
    }
}

impl Schema for WishlistItem {
    const FIELDS: &'static [&'static str] = &["id", "userId", "productId", "timestamp"];
}

/// Body of `POST /api/wishlist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistCreate {
    pub user_id: UserId,
    pub product_id: ProductId,
}

impl Schema for WishlistCreate {
    const FIELDS: &'static [&'static str] = &["userId", "productId"];
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::test_support::assert_fields_match;

    #[test]
    fn test_fields_match_serialized_shape() {
        let request = WishlistCreate {
            user_id: UserId::new("u-1"),
            product_id: ProductId::new("p-1"),
        };
        assert_fields_match(&request);

        let item = WishlistItem::new(request);
        assert_eq!(item.user_id.as_str(), "u-1");
        assert_fields_match(&item);
    }
}
