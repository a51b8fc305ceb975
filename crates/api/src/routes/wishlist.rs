//! Wishlist route handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::error::Result;
use crate::extract::AllowListJson;
use crate::models::{MessageResponse, WishlistCreate, WishlistItem};
use crate::services::WishlistService;
use crate::state::AppState;

/// List a user's wishlist.
///
/// GET /api/wishlist/{user_id}
pub async fn index(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<WishlistItem>>> {
    let items = WishlistService::new(state.store()).list(&user_id).await?;
    Ok(Json(items))
}

/// Add a product to a wishlist.
///
/// POST /api/wishlist
pub async fn add(
    State(state): State<AppState>,
    AllowListJson(request): AllowListJson<WishlistCreate>,
) -> Result<Json<WishlistItem>> {
    let item = WishlistService::new(state.store()).add(request).await?;
    Ok(Json(item))
}

/// Remove a product from a wishlist.
///
/// DELETE /api/wishlist/{user_id}/{product_id}
pub async fn remove(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>> {
    WishlistService::new(state.store())
        .remove(&user_id, &product_id)
        .await?;
    Ok(Json(MessageResponse::new("Removed from wishlist")))
}
