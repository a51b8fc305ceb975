//! Price-drop alerts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartdeal_core::{Email, PriceAlertId, ProductId, UserId, timestamp};

use super::Schema;

/// A request to be notified when a product drops to `target_price`.
///
/// A user may hold any number of alerts for the same product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAlert {
    pub id: PriceAlertId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub target_price: f64,
    pub email: Email,
    #[serde(default = "super::default_true")]
    pub active: bool,
    #[serde(with = "smartdeal_core::timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl PriceAlert {
    /// Build a new, active alert with a fresh id and creation timestamp.
    #[must_use]
    pub fn new(request: PriceAlertCreate) -> Self {
        Self {
            id: PriceAlertId::generate(),
            user_id: request.user_id,
            product_id: request.product_id,
            target_price: request.target_price,
            email: request.email,
            active: true,
            timestamp: timestamp::now(),
        }
    }
}

impl Schema for PriceAlert {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "userId",
        "productId",
        "targetPrice",
        "email",
        "active",
        "timestamp",
    ];
}

/// Body of `POST /api/price-alerts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAlertCreate {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub target_price: f64,
    pub email: Email,
}

impl Schema for PriceAlertCreate {
    const FIELDS: &'static [&'static str] = &["userId", "productId", "targetPrice", "email"];
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::db::Document;
    use crate::models::test_support::assert_fields_match;

    fn doc(value: serde_json::Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_new_alert_is_active() {
        let request = PriceAlertCreate::from_document(doc(json!({
            "userId": "u-1",
            "productId": "p-1",
            "targetPrice": 50_000,
            "email": "asha@example.com",
            "active": false
        })))
        .unwrap();
        assert_fields_match(&request);

        let alert = PriceAlert::new(request);
        assert!(alert.active);
        assert!((alert.target_price - 50_000.0).abs() < f64::EPSILON);
        assert_fields_match(&alert);
    }

    #[test]
    fn test_stored_alert_without_active_defaults_true() {
        let alert = PriceAlert::from_document(doc(json!({
            "id": "a-1",
            "userId": "u-1",
            "productId": "p-1",
            "targetPrice": 10.5,
            "email": "asha@example.com",
            "timestamp": 1_704_067_200_000_i64
        })))
        .unwrap();
        assert!(alert.active);
        assert_eq!(
            timestamp::format(&alert.timestamp),
            "2024-01-01T00:00:00.000000Z"
        );
    }

    #[test]
    fn test_invalid_email_fails() {
        let result = PriceAlertCreate::from_document(doc(json!({
            "userId": "u-1",
            "productId": "p-1",
            "targetPrice": 10,
            "email": "asha@localhost"
        })));
        assert!(result.is_err());
    }
}
