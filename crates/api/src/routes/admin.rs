//! Admin route handlers.
//!
//! No authentication is applied here; deployments restrict `/api/admin` at
//! the edge.

use axum::{Json, extract::State};

use crate::error::Result;
use crate::models::{Analytics, MessageResponse};
use crate::services::{AnalyticsService, SeedService};
use crate::state::AppState;

/// Usage analytics.
///
/// GET /api/admin/analytics
pub async fn analytics(State(state): State<AppState>) -> Result<Json<Analytics>> {
    let snapshot = AnalyticsService::new(state.store()).snapshot().await?;
    Ok(Json(snapshot))
}

/// Load the demo catalog into an empty store.
///
/// POST /api/admin/seed-products
pub async fn seed_products(State(state): State<AppState>) -> Result<Json<MessageResponse>> {
    let outcome = SeedService::new(state.store()).seed_products().await?;
    Ok(Json(MessageResponse::new(outcome.message())))
}
