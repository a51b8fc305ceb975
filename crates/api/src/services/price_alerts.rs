//! Price alert operations.

use tracing::instrument;

use crate::db::{Collection, DocumentStore, Filter};
use crate::models::{PriceAlert, PriceAlertCreate};

use super::{ServiceError, encode, list_by_user};

/// Price alert service.
pub struct PriceAlertService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> PriceAlertService<'a> {
    /// Create a new price alert service.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// List a user's alerts.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: &str) -> Result<Vec<PriceAlert>, ServiceError> {
        list_by_user(self.store, Collection::PriceAlerts, user_id).await
    }

    /// Create an alert. Duplicates are allowed.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the insert fails.
    #[instrument(skip(self, request), fields(user_id = %request.user_id, product_id = %request.product_id))]
    pub async fn create(&self, request: PriceAlertCreate) -> Result<PriceAlert, ServiceError> {
        let alert = PriceAlert::new(request);
        self.store
            .insert_one(Collection::PriceAlerts, encode(&alert)?)
            .await?;

        tracing::info!(alert_id = %alert.id, target_price = alert.target_price, "Price alert created");
        Ok(alert)
    }

    /// Delete an alert by id.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if no alert has this id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let deleted = self
            .store
            .delete_one(Collection::PriceAlerts, &Filter::eq("id", id))
            .await?;

        if deleted == 0 {
            return Err(ServiceError::NotFound("Alert not found"));
        }
        Ok(())
    }
}
