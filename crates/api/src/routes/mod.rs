//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                              - Liveness check
//! GET    /health/ready                        - Readiness check (pings the store)
//!
//! GET    /api                                 - Service banner
//!
//! # Catalog
//! GET    /api/products                        - Product search
//! GET    /api/products/{id}                   - Product detail
//!
//! # Users
//! POST   /api/users                           - Find or create by firebaseUid
//! GET    /api/users/{id}                      - User detail
//!
//! # Wishlist
//! GET    /api/wishlist/{user_id}              - List
//! POST   /api/wishlist                        - Add
//! DELETE /api/wishlist/{user_id}/{product_id} - Remove
//!
//! # Cart
//! GET    /api/cart/{user_id}                  - List
//! POST   /api/cart                            - Add
//! DELETE /api/cart/{user_id}/{product_id}     - Remove
//!
//! # Price alerts
//! GET    /api/price-alerts/{user_id}          - List
//! POST   /api/price-alerts                    - Create
//! DELETE /api/price-alerts/{id}               - Delete
//!
//! The two price-alert paths share one route, `/{id}`.
//!
//! # Admin
//! GET    /api/admin/analytics                 - Usage snapshot
//! POST   /api/admin/seed-products             - Load the demo catalog
//! ```

pub mod admin;
pub mod cart;
pub mod health;
pub mod price_alerts;
pub mod products;
pub mod users;
pub mod wishlist;

use axum::{
    Json, Router,
    routing::{delete, get, post},
};

use crate::models::MessageResponse;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create))
        .route("/{id}", get(users::show))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(wishlist::add))
        .route("/{user_id}", get(wishlist::index))
        .route("/{user_id}/{product_id}", delete(wishlist::remove))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cart::add))
        .route("/{user_id}", get(cart::index))
        .route("/{user_id}/{product_id}", delete(cart::remove))
}

/// Create the price alert routes router.
pub fn price_alert_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(price_alerts::create))
        // GET takes a user id, DELETE an alert id.
        .route("/{id}", get(price_alerts::index).delete(price_alerts::remove))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics", get(admin::analytics))
        .route("/seed-products", post(admin::seed_products))
}

/// Create the `/api` routes, without the prefix.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/users", user_routes())
        .nest("/wishlist", wishlist_routes())
        .nest("/cart", cart_routes())
        .nest("/price-alerts", price_alert_routes())
        .nest("/admin", admin_routes())
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Operational endpoints
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        // Banner, with and without the trailing slash
        .route("/api", get(root))
        .route("/api/", get(root))
        .nest("/api", api_routes())
}

/// Service banner.
///
/// GET /api
async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("SMARTDEAL HUB API"))
}
