//! Cart operations.

use tracing::instrument;

use crate::db::{Collection, DocumentStore};
use crate::models::{CartCreate, CartItem};

use super::{ServiceError, delete_pair, encode, insert_pair, list_by_user};

/// Cart service.
pub struct CartService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// List a user's cart.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: &str) -> Result<Vec<CartItem>, ServiceError> {
        list_by_user(self.store, Collection::Cart, user_id).await
    }

    /// Put a product in a user's cart.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Conflict` if the product is already in the
    /// cart, whatever store was selected; nothing is written in that case.
    #[instrument(skip(self, request), fields(user_id = %request.user_id, product_id = %request.product_id))]
    pub async fn add(&self, request: CartCreate) -> Result<CartItem, ServiceError> {
        let item = CartItem::new(request);
        let inserted = insert_pair(
            self.store,
            Collection::Cart,
            encode(&item)?,
            item.user_id.as_str(),
            item.product_id.as_str(),
        )
        .await?;

        if !inserted {
            return Err(ServiceError::Conflict("Already in cart"));
        }

        tracing::info!(selected_store = %item.selected_store, "Added to cart");
        Ok(item)
    }

    /// Remove a product from a user's cart.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the pair is not in the cart.
    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: &str, product_id: &str) -> Result<(), ServiceError> {
        if delete_pair(self.store, Collection::Cart, user_id, product_id).await? {
            Ok(())
        } else {
            Err(ServiceError::NotFound("Item not found in cart"))
        }
    }
}
