//! User route handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::error::Result;
use crate::extract::AllowListJson;
use crate::models::{User, UserCreate};
use crate::services::UserService;
use crate::state::AppState;

/// Register a user, or return the existing user for the same `firebaseUid`.
///
/// POST /api/users
pub async fn create(
    State(state): State<AppState>,
    AllowListJson(request): AllowListJson<UserCreate>,
) -> Result<Json<User>> {
    let user = UserService::new(state.store())
        .find_or_create(request)
        .await?;
    Ok(Json(user))
}

/// Get a user by id.
///
/// GET /api/users/{id}
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<User>> {
    let user = UserService::new(state.store()).get(&id).await?;
    Ok(Json(user))
}
