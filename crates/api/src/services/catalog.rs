//! Product listing and lookup.

use tracing::instrument;

use crate::db::{Collection, DocumentStore, Filter, FindOptions, MAX_RESULTS};
use crate::models::Product;
use crate::query::ProductQuery;

use super::{ServiceError, decode, decode_all};

/// Read-only access to the product catalog.
pub struct CatalogService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// List products matching `query`.
    ///
    /// The store query is capped at [`MAX_RESULTS`] documents; the price
    /// range is applied to that capped result.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the query fails and
    /// `ServiceError::DataCorruption` if a stored product is malformed.
    #[instrument(skip(self), fields(count = tracing::field::Empty))]
    pub async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, ServiceError> {
        let documents = self
            .store
            .find(
                Collection::Products,
                &query.filter(),
                &FindOptions::default().limit(MAX_RESULTS),
            )
            .await?;

        let products = query.price_range().apply(decode_all(documents)?);
        tracing::Span::current().record("count", products.len());
        Ok(products)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no product has this id.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(&self, id: &str) -> Result<Product, ServiceError> {
        let document = self
            .store
            .find_one(Collection::Products, &Filter::eq("id", id))
            .await?
            .ok_or(ServiceError::NotFound("Product not found"))?;
        decode(document)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::db::MemoryDocumentStore;
    use crate::services::test_support::doc;

    fn product(id: &str, name: &str, brand: &str, amazon: f64, flipkart: f64) -> crate::db::Document {
        doc(json!({
            "id": id,
            "name": name,
            "brand": brand,
            "image": "",
            "ram": "8GB",
            "storage": "128GB",
            "processor": "",
            "camera": "",
            "display": "",
            "battery": "",
            "amazonPrice": amazon,
            "amazonUrl": "",
            "flipkartPrice": flipkart,
            "flipkartUrl": "",
            "rating": 4.0,
            "bestStore": "Amazon",
            "specifications": {},
            "timestamp": "2024-01-01T00:00:00.000000Z"
        }))
    }

    async fn seeded() -> MemoryDocumentStore {
        let store = MemoryDocumentStore::new();
        store
            .insert_many(
                Collection::Products,
                vec![
                    product("1", "Alpha One", "Acme", 100.0, 150.0),
                    product("2", "Beta Two", "Bolt", 300.0, 250.0),
                    product("3", "Gamma Three", "Acme", 500.0, 600.0),
                ],
            )
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_list_applies_price_range_to_best_price() {
        let store = seeded().await;
        let catalog = CatalogService::new(&store);

        let query = ProductQuery {
            min_price: Some(100.0),
            max_price: Some(250.0),
            ..Default::default()
        };
        let ids: Vec<String> = catalog
            .list(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id.into_inner())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_list_search_intersects_with_brand() {
        let store = seeded().await;
        let catalog = CatalogService::new(&store);

        let query = ProductQuery {
            brand: Some("Acme".to_string()),
            search: Some("three".to_string()),
            ..Default::default()
        };
        let products = catalog.list(&query).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id.as_str(), "3");
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let store = seeded().await;
        let catalog = CatalogService::new(&store);

        assert_eq!(catalog.get("2").await.unwrap().brand, "Bolt");
        assert!(matches!(
            catalog.get("nope").await,
            Err(ServiceError::NotFound("Product not found"))
        ));
    }
}
