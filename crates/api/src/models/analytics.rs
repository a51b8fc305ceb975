//! Admin analytics snapshot. Derived on every request, never stored.

use serde::Serialize;

use super::PriceAlert;

/// Usage counters, brand distribution and recent activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_products: u64,
    pub total_users: u64,
    pub total_wishlists: u64,
    pub total_carts: u64,
    pub total_alerts: u64,
    pub top_brands: Vec<BrandCount>,
    pub recent_activity: Vec<Activity>,
}

/// Number of products carrying a brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandCount {
    pub brand: String,
    pub count: u64,
}

/// An entry in the recent-activity feed, serialized as
/// `{"type": "alert", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Activity {
    Alert(PriceAlert),
}
