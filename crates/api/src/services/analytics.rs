//! Admin analytics aggregation.

use std::collections::HashMap;

use serde_json::Value;
use tracing::instrument;

use crate::db::{Collection, Document, DocumentStore, Filter, FindOptions, MAX_RESULTS};
use crate::models::{Activity, Analytics, BrandCount, PriceAlert};

use super::{ServiceError, decode_all};

/// Number of brands reported in `topBrands`.
const TOP_BRANDS: usize = 5;

/// Number of entries in `recentActivity`.
const RECENT_ACTIVITY: usize = 5;

/// Brand reported for products without one.
const UNKNOWN_BRAND: &str = "Unknown";

/// Computes the analytics snapshot from scratch on every call.
pub struct AnalyticsService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> AnalyticsService<'a> {
    /// Create a new analytics service.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Collection sizes, top brands and recent alert activity.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if any query fails.
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<Analytics, ServiceError> {
        let total_products = self.count(Collection::Products).await?;
        let total_users = self.count(Collection::Users).await?;
        let total_wishlists = self.count(Collection::Wishlist).await?;
        let total_carts = self.count(Collection::Cart).await?;
        let total_alerts = self.count(Collection::PriceAlerts).await?;

        let brands = self
            .store
            .find(
                Collection::Products,
                &Filter::All,
                &FindOptions::default().limit(MAX_RESULTS).project(&["brand"]),
            )
            .await?;

        let alerts = self
            .store
            .find(Collection::PriceAlerts, &Filter::All, &FindOptions::default())
            .await?;
        let recent_activity = most_recent(decode_all(alerts)?, RECENT_ACTIVITY)
            .into_iter()
            .map(Activity::Alert)
            .collect();

        Ok(Analytics {
            total_products,
            total_users,
            total_wishlists,
            total_carts,
            total_alerts,
            top_brands: top_brands(&brands, TOP_BRANDS),
            recent_activity,
        })
    }

    async fn count(&self, collection: Collection) -> Result<u64, ServiceError> {
        Ok(self.store.count_documents(collection, &Filter::All).await?)
    }
}

/// The `limit` newest alerts by creation time, newest first.
///
/// Timestamps are compared after parsing, since stored documents may carry
/// any of the accepted timestamp representations.
fn most_recent(mut alerts: Vec<PriceAlert>, limit: usize) -> Vec<PriceAlert> {
    alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    alerts.truncate(limit);
    alerts
}

/// Count products per brand and keep the `limit` largest groups.
///
/// Groups are formed in first-seen order and sorted stably, so equal counts
/// keep the order in which their brand first appeared.
fn top_brands(products: &[Document], limit: usize) -> Vec<BrandCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<BrandCount> = Vec::new();

    for product in products {
        let brand = product
            .get("brand")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_BRAND);

        match index.get(brand) {
            Some(&i) => {
                if let Some(entry) = counts.get_mut(i) {
                    entry.count += 1;
                }
            }
            None => {
                index.insert(brand, counts.len());
                counts.push(BrandCount {
                    brand: brand.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}
