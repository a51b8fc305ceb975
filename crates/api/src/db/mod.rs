//! Document store used by every service.
//!
//! # Collections
//!
//! - `products` - Catalog entries with per-retailer prices
//! - `users` - Users keyed by their external auth identity (`firebaseUid`)
//! - `wishlist` - (user, product) wishlist entries
//! - `cart` - (user, product) cart entries with the chosen retailer
//! - `price_alerts` - Price-drop alerts
//!
//! # Backends
//!
//! - [`PgDocumentStore`] - one JSONB `documents` table in `PostgreSQL`
//! - [`MemoryDocumentStore`] - process-local, used by tests and `memory://` runs
//!
//! The backend is chosen from the store URL by [`connect`] and injected into
//! the application state as `Arc<dyn DocumentStore>`.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p smartdeal-cli -- migrate
//! ```

pub mod filter;
pub mod memory;
pub mod postgres;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use thiserror::Error;

pub use filter::{FindOptions, Filter};
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// A schemaless JSON object as stored.
pub type Document = Map<String, Value>;

/// Hard cap on the number of documents any listing query returns.
pub const MAX_RESULTS: usize = 1000;

/// Separator between key components of a conditional insert.
const UNIQUE_KEY_SEPARATOR: char = '\u{1f}';

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The document has no string `id` field.
    #[error("document is missing a string `id` field")]
    MissingId,

    /// The store URL names a backend we do not support.
    #[error("unsupported store url scheme: {0}")]
    UnsupportedScheme(String),
}

/// Named collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Users,
    Wishlist,
    Cart,
    PriceAlerts,
}

impl Collection {
    /// The collection name as persisted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Users => "users",
            Self::Wishlist => "wishlist",
            Self::Cart => "cart",
            Self::PriceAlerts => "price_alerts",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collection-oriented persistence.
///
/// All operations are independent; the only atomicity guarantee beyond single
/// statements is [`DocumentStore::insert_unique`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return documents matching `filter`, in insertion order, honoring limit
    /// and projection.
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>, StoreError>;

    /// Return the first matching document in insertion order.
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let options = FindOptions::default().limit(1);
        Ok(self
            .find(collection, filter, &options)
            .await?
            .into_iter()
            .next())
    }

    /// Insert a single document. The document must carry a string `id`.
    async fn insert_one(&self, collection: Collection, document: Document)
    -> Result<(), StoreError>;

    /// Insert all documents or none. Returns the number inserted.
    async fn insert_many(
        &self,
        collection: Collection,
        documents: Vec<Document>,
    ) -> Result<usize, StoreError>;

    /// Insert unless another conditionally-inserted document in the
    /// collection has the same values for `key`. Check and insert are atomic.
    ///
    /// Returns `true` if the document was inserted.
    async fn insert_unique(
        &self,
        collection: Collection,
        document: Document,
        key: &[&str],
    ) -> Result<bool, StoreError>;

    /// Delete the first matching document. Returns the number deleted (0 or 1).
    async fn delete_one(&self, collection: Collection, filter: &Filter)
    -> Result<u64, StoreError>;

    /// Count matching documents.
    async fn count_documents(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<u64, StoreError>;

    /// Verify the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release backend resources. Called once at shutdown.
    async fn close(&self);
}

/// Open the store named by `url`.
///
/// - `memory://` opens an empty process-local store
/// - `postgres://` / `postgresql://` connects a pool; `database` overrides the
///   database named in the URL
///
/// # Errors
///
/// Returns `StoreError::UnsupportedScheme` for other URLs and
/// `StoreError::Database` if the connection cannot be established.
pub async fn connect(
    url: &SecretString,
    database: Option<&str>,
) -> Result<Arc<dyn DocumentStore>, StoreError> {
    let raw = url.expose_secret();
    let scheme = raw.split_once("://").map_or("", |(scheme, _)| scheme);

    match scheme {
        "memory" => {
            tracing::warn!("Using in-memory document store; data is lost on exit");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
        "postgres" | "postgresql" => {
            let store = PgDocumentStore::connect(url, database).await?;
            Ok(Arc::new(store))
        }
        other => Err(StoreError::UnsupportedScheme(other.to_owned())),
    }
}

/// Keep only the listed top-level fields.
#[must_use]
pub fn project(document: Document, fields: &[&str]) -> Document {
    document
        .into_iter()
        .filter(|(key, _)| fields.contains(&key.as_str()))
        .collect()
}

/// The document's `id` field.
///
/// # Errors
///
/// Returns `StoreError::MissingId` if there is no string `id`.
pub fn document_id(document: &Document) -> Result<&str, StoreError> {
    document
        .get("id")
        .and_then(Value::as_str)
        .ok_or(StoreError::MissingId)
}

/// Serialize the `key` fields of a document into a single comparable string.
#[must_use]
pub fn unique_key(document: &Document, key: &[&str]) -> String {
    key.iter()
        .map(|field| document.get(*field).map_or_else(|| "null".to_owned(), Value::to_string))
        .collect::<Vec<_>>()
        .join(&UNIQUE_KEY_SEPARATOR.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => Document::new(),
        }
    }

    #[test]
    fn test_project_keeps_listed_fields() {
        let d = doc(json!({ "id": "1", "brand": "Apple", "_id": "x" }));
        let projected = project(d, &["brand"]);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected.get("brand"), Some(&json!("Apple")));
    }

    #[test]
    fn test_document_id() {
        assert_eq!(document_id(&doc(json!({ "id": "abc" }))).unwrap(), "abc");
        assert!(matches!(
            document_id(&doc(json!({ "id": 7 }))),
            Err(StoreError::MissingId)
        ));
    }

    #[test]
    fn test_unique_key_distinguishes_field_boundaries() {
        let a = doc(json!({ "userId": "ab", "productId": "c" }));
        let b = doc(json!({ "userId": "a", "productId": "bc" }));
        let key = ["userId", "productId"];
        assert_ne!(unique_key(&a, &key), unique_key(&b, &key));
        assert_eq!(unique_key(&a, &key), unique_key(&a.clone(), &key));
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::PriceAlerts.as_str(), "price_alerts");
        assert_eq!(Collection::Wishlist.to_string(), "wishlist");
    }

    #[tokio::test]
    async fn test_connect_memory_and_unknown_scheme() {
        let store = connect(&SecretString::from("memory://"), None).await.unwrap();
        store.ping().await.unwrap();

        let err = connect(&SecretString::from("mongodb://localhost"), None).await;
        assert!(matches!(err, Err(StoreError::UnsupportedScheme(s)) if s == "mongodb"));
    }
}
