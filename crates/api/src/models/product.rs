//! Catalog product with per-retailer pricing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use smartdeal_core::ProductId;

use super::Schema;

/// A product listed on both retailers.
///
/// `best_store` is a stored label and is never recomputed from the prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub image: String,
    pub ram: String,
    pub storage: String,
    pub processor: String,
    pub camera: String,
    pub display: String,
    pub battery: String,
    pub amazon_price: f64,
    pub amazon_url: String,
    pub flipkart_price: f64,
    pub flipkart_url: String,
    pub rating: f64,
    pub best_store: String,
    pub specifications: Map<String, Value>,
    #[serde(with = "smartdeal_core::timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl Product {
    /// The lower of the two retailer prices.
    #[must_use]
    pub fn best_price(&self) -> f64 {
        self.amazon_price.min(self.flipkart_price)
    }
}

impl Schema for Product {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "brand",
        "image",
        "ram",
        "storage",
        "processor",
        "camera",
        "display",
        "battery",
        "amazonPrice",
        "amazonUrl",
        "flipkartPrice",
        "flipkartUrl",
        "rating",
        "bestStore",
        "specifications",
        "timestamp",
    ];
}
