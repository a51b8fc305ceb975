//! Price alert route handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::error::Result;
use crate::extract::AllowListJson;
use crate::models::{MessageResponse, PriceAlert, PriceAlertCreate};
use crate::services::PriceAlertService;
use crate::state::AppState;

/// List a user's alerts.
///
/// GET /api/price-alerts/{user_id}
pub async fn index(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<PriceAlert>>> {
    let alerts = PriceAlertService::new(state.store()).list(&user_id).await?;
    Ok(Json(alerts))
}

/// Create an alert.
///
/// POST /api/price-alerts
pub async fn create(
    State(state): State<AppState>,
    AllowListJson(request): AllowListJson<PriceAlertCreate>,
) -> Result<Json<PriceAlert>> {
    let alert = PriceAlertService::new(state.store()).create(request).await?;
    Ok(Json(alert))
}

/// Delete an alert by id.
///
/// DELETE /api/price-alerts/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    PriceAlertService::new(state.store()).delete(&id).await?;
    Ok(Json(MessageResponse::new("Alert deleted")))
}
