//! Business logic over the document store.
//!
//! Services borrow the store for the duration of a request:
//!
//! ```rust,ignore
//! let products = CatalogService::new(state.store()).list(&query).await?;
//! ```

pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod price_alerts;
pub mod seed;
pub mod users;
pub mod wishlist;

use serde::Serialize;
use thiserror::Error;

use crate::db::{Collection, Document, DocumentStore, Filter, FindOptions, MAX_RESULTS, StoreError};
use crate::models::{Schema, to_document};

pub use analytics::AnalyticsService;
pub use cart::CartService;
pub use catalog::CatalogService;
pub use price_alerts::PriceAlertService;
pub use seed::{SeedOutcome, SeedService};
pub use users::UserService;
pub use wishlist::WishlistService;

/// Fields identifying a (user, product) relationship.
const PAIR_KEY: [&str; 2] = ["userId", "productId"];

/// Errors that can occur in service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The addressed record does not exist.
    #[error("{0}")]
    NotFound(&'static str),

    /// The record already exists.
    #[error("{0}")]
    Conflict(&'static str),

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A stored document does not fit its schema.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Deserialize a stored document through its schema.
fn decode<T: Schema>(document: Document) -> Result<T, ServiceError> {
    T::from_document(document).map_err(|e| ServiceError::DataCorruption(e.to_string()))
}

/// Deserialize every document, failing on the first mismatch.
fn decode_all<T: Schema>(documents: Vec<Document>) -> Result<Vec<T>, ServiceError> {
    documents.into_iter().map(decode).collect()
}

/// Serialize an entity for storage.
fn encode<T: Serialize>(value: &T) -> Result<Document, ServiceError> {
    to_document(value).map_err(|e| ServiceError::DataCorruption(e.to_string()))
}

/// Filter selecting a (user, product) pair.
fn pair_filter(user_id: &str, product_id: &str) -> Filter {
    Filter::and(vec![
        Filter::eq(PAIR_KEY[0], user_id),
        Filter::eq(PAIR_KEY[1], product_id),
    ])
}

/// All records in `collection` belonging to `user_id`, capped at
/// [`MAX_RESULTS`].
async fn list_by_user<T: Schema>(
    store: &dyn DocumentStore,
    collection: Collection,
    user_id: &str,
) -> Result<Vec<T>, ServiceError> {
    let documents = store
        .find(
            collection,
            &Filter::eq("userId", user_id),
            &FindOptions::default().limit(MAX_RESULTS),
        )
        .await?;
    decode_all(documents)
}

/// Insert a relationship record unless its (user, product) pair is taken.
///
/// Returns `false` without writing if the pair already exists.
async fn insert_pair(
    store: &dyn DocumentStore,
    collection: Collection,
    document: Document,
    user_id: &str,
    product_id: &str,
) -> Result<bool, ServiceError> {
    // Records written before conditional inserts carry no unique key.
    if store
        .find_one(collection, &pair_filter(user_id, product_id))
        .await?
        .is_some()
    {
        return Ok(false);
    }

    Ok(store.insert_unique(collection, document, &PAIR_KEY).await?)
}

/// Delete a relationship record by its (user, product) pair.
///
/// Returns `false` if nothing matched.
async fn delete_pair(
    store: &dyn DocumentStore,
    collection: Collection,
    user_id: &str,
    product_id: &str,
) -> Result<bool, ServiceError> {
    let deleted = store
        .delete_one(collection, &pair_filter(user_id, product_id))
        .await?;
    Ok(deleted > 0)
}

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::Value;

    use crate::db::Document;

    /// Build a document from a JSON object literal.
    pub fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => Document::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::test_support::doc;
    use super::*;
    use crate::db::MemoryDocumentStore;
    use crate::models::WishlistItem;

    #[tokio::test]
    async fn test_insert_pair_detects_records_without_unique_key() {
        let store = MemoryDocumentStore::new();
        store
            .insert_one(
                Collection::Wishlist,
                doc(json!({ "id": "w-0", "userId": "u", "productId": "p" })),
            )
            .await
            .unwrap();

        let inserted = insert_pair(
            &store,
            Collection::Wishlist,
            doc(json!({ "id": "w-1", "userId": "u", "productId": "p" })),
            "u",
            "p",
        )
        .await
        .unwrap();
        assert!(!inserted);
    }

    #[tokio::test]
    async fn test_decode_reports_corruption() {
        let store = MemoryDocumentStore::new();
        store
            .insert_one(
                Collection::Wishlist,
                doc(json!({ "id": "w-0", "userId": "u" })),
            )
            .await
            .unwrap();

        let result = list_by_user::<WishlistItem>(&store, Collection::Wishlist, "u").await;
        assert!(matches!(result, Err(ServiceError::DataCorruption(_))));
    }

    #[test]
    fn test_error_messages_are_client_facing() {
        assert_eq!(
            ServiceError::NotFound("Product not found").to_string(),
            "Product not found"
        );
        assert_eq!(
            ServiceError::Conflict("Already in cart").to_string(),
            "Already in cart"
        );
    }
}
