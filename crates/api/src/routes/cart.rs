//! Cart route handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::error::Result;
use crate::extract::AllowListJson;
use crate::models::{CartCreate, CartItem, MessageResponse};
use crate::services::CartService;
use crate::state::AppState;

/// List a user's cart.
///
/// GET /api/cart/{user_id}
pub async fn index(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<CartItem>>> {
    let items = CartService::new(state.store()).list(&user_id).await?;
    Ok(Json(items))
}

/// Add a product to a cart.
///
/// POST /api/cart
pub async fn add(
    State(state): State<AppState>,
    AllowListJson(request): AllowListJson<CartCreate>,
) -> Result<Json<CartItem>> {
    let item = CartService::new(state.store()).add(request).await?;
    Ok(Json(item))
}

/// Remove a product from a cart.
///
/// DELETE /api/cart/{user_id}/{product_id}
pub async fn remove(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>> {
    CartService::new(state.store())
        .remove(&user_id, &product_id)
        .await?;
    Ok(Json(MessageResponse::new("Removed from cart")))
}
