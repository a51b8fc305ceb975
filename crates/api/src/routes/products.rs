//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::error::Result;
use crate::models::Product;
use crate::query::ProductQuery;
use crate::services::CatalogService;
use crate::state::AppState;

/// Search products.
///
/// GET /api/products?brand=&minPrice=&maxPrice=&ram=&storage=&minRating=&search=
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = CatalogService::new(state.store()).list(&query).await?;
    Ok(Json(products))
}

/// Get a product by id.
///
/// GET /api/products/{id}
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let product = CatalogService::new(state.store()).get(&id).await?;
    Ok(Json(product))
}
