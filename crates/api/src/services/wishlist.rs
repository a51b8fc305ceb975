//! Wishlist operations.

use tracing::instrument;

use crate::db::{Collection, DocumentStore};
use crate::models::{WishlistCreate, WishlistItem};

use super::{ServiceError, delete_pair, encode, insert_pair, list_by_user};

/// Wishlist service.
pub struct WishlistService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> WishlistService<'a> {
    /// Create a new wishlist service.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// List a user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: &str) -> Result<Vec<WishlistItem>, ServiceError> {
        list_by_user(self.store, Collection::Wishlist, user_id).await
    }

    /// Add a product to a user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Conflict` if the product is already on the
    /// user's wishlist; nothing is written in that case.
    #[instrument(skip(self, request), fields(user_id = %request.user_id, product_id = %request.product_id))]
    pub async fn add(&self, request: WishlistCreate) -> Result<WishlistItem, ServiceError> {
        let item = WishlistItem::new(request);
        let inserted = insert_pair(
            self.store,
            Collection::Wishlist,
            encode(&item)?,
            item.user_id.as_str(),
            item.product_id.as_str(),
        )
        .await?;

        if !inserted {
            return Err(ServiceError::Conflict("Already in wishlist"));
        }

        tracing::info!("Added to wishlist");
        Ok(item)
    }

    /// Remove a product from a user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the pair is not on the wishlist.
    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: &str, product_id: &str) -> Result<(), ServiceError> {
        if delete_pair(self.store, Collection::Wishlist, user_id, product_id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound("Item not found in wishlist"))
        }
    }
}
