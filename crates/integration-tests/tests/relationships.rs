//! Integration tests for wishlists, carts and price alerts.

use axum::http::StatusCode;
use serde_json::json;

use smartdeal_api::db::Collection;
use smartdeal_integration_tests::{TestApp, pluck, str_field};

#[tokio::test]
async fn test_wishlist_add_list_remove() {
    let app = TestApp::new();
    let body = json!({ "userId": "u1", "productId": "p1" });

    let added = app.post("/api/wishlist", &body).await;
    assert_eq!(added.status, StatusCode::OK);
    assert_eq!(str_field(&added.body, "userId"), "u1");
    assert_eq!(str_field(&added.body, "productId"), "p1");

    let listed = app.get("/api/wishlist/u1").await;
    assert_eq!(pluck(&listed.body, "productId"), vec!["p1"]);

    let removed = app.delete("/api/wishlist/u1/p1").await;
    assert_eq!(removed.status, StatusCode::OK);
    assert_eq!(removed.body, json!({ "message": "Removed from wishlist" }));

    let empty = app.get("/api/wishlist/u1").await;
    assert_eq!(empty.body, json!([]));
}

#[tokio::test]
async fn test_duplicate_wishlist_entry_is_rejected() {
    let app = TestApp::new();
    let body = json!({ "userId": "u1", "productId": "p1" });

    app.post("/api/wishlist", &body).await;
    let duplicate = app.post("/api/wishlist", &body).await;

    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.body, json!({ "detail": "Already in wishlist" }));
    assert_eq!(app.count(Collection::Wishlist).await, 1);
}

#[tokio::test]
async fn test_concurrent_wishlist_adds_store_one_entry() {
    let app = TestApp::new();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                app.post(
                    "/api/wishlist",
                    &json!({ "userId": "u1", "productId": "p1" }),
                )
                .await
                .status
            })
        })
        .collect();

    let mut ok = 0;
    for handle in handles {
        let status = handle.await.expect("task panicked");
        if status == StatusCode::OK {
            ok += 1;
        } else {
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }

    assert_eq!(ok, 1);
    assert_eq!(app.count(Collection::Wishlist).await, 1);
}

#[tokio::test]
async fn test_wishlist_is_scoped_per_user() {
    let app = TestApp::new();
    app.post("/api/wishlist", &json!({ "userId": "u1", "productId": "p1" }))
        .await;
    let other = app
        .post("/api/wishlist", &json!({ "userId": "u2", "productId": "p1" }))
        .await;
    assert_eq!(other.status, StatusCode::OK);

    assert_eq!(
        pluck(&app.get("/api/wishlist/u2").await.body, "userId"),
        vec!["u2"]
    );
}

#[tokio::test]
async fn test_removing_missing_entries_leaves_store_unchanged() {
    let app = TestApp::new();
    app.post("/api/wishlist", &json!({ "userId": "u1", "productId": "p1" }))
        .await;
    app.post(
        "/api/cart",
        &json!({ "userId": "u1", "productId": "p1", "selectedStore": "Amazon" }),
    )
    .await;

    let wishlist = app.delete("/api/wishlist/u1/p2").await;
    assert_eq!(wishlist.status, StatusCode::NOT_FOUND);
    assert_eq!(wishlist.body, json!({ "detail": "Item not found in wishlist" }));

    let cart = app.delete("/api/cart/u2/p1").await;
    assert_eq!(cart.status, StatusCode::NOT_FOUND);
    assert_eq!(cart.body, json!({ "detail": "Item not found in cart" }));

    let alert = app.delete("/api/price-alerts/missing").await;
    assert_eq!(alert.status, StatusCode::NOT_FOUND);
    assert_eq!(alert.body, json!({ "detail": "Alert not found" }));

    assert_eq!(app.count(Collection::Wishlist).await, 1);
    assert_eq!(app.count(Collection::Cart).await, 1);
}

#[tokio::test]
async fn test_cart_add_duplicate_and_remove() {
    let app = TestApp::new();
    let body = json!({ "userId": "u1", "productId": "p1", "selectedStore": "Flipkart" });

    let added = app.post("/api/cart", &body).await;
    assert_eq!(added.status, StatusCode::OK);
    assert_eq!(str_field(&added.body, "selectedStore"), "Flipkart");

    let duplicate = app.post("/api/cart", &body).await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.body, json!({ "detail": "Already in cart" }));

    let removed = app.delete("/api/cart/u1/p1").await;
    assert_eq!(removed.body, json!({ "message": "Removed from cart" }));
    assert_eq!(app.count(Collection::Cart).await, 0);
}

#[tokio::test]
async fn test_cart_requires_selected_store() {
    let app = TestApp::new();
    let response = app
        .post("/api/cart", &json!({ "userId": "u1", "productId": "p1" }))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_price_alert_lifecycle() {
    let app = TestApp::new();
    let body = json!({
        "userId": "u1",
        "productId": "p1",
        "targetPrice": 59_999.0,
        "email": "asha@example.com"
    });

    let created = app.post("/api/price-alerts", &body).await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["active"], json!(true));
    assert_eq!(created.body["targetPrice"], json!(59_999.0));

    // Alerts are not deduplicated.
    let again = app.post("/api/price-alerts", &body).await;
    assert_eq!(again.status, StatusCode::OK);

    let listed = app.get("/api/price-alerts/u1").await;
    assert_eq!(listed.body.as_array().map(Vec::len), Some(2));

    let id = str_field(&created.body, "id");
    let deleted = app.delete(&format!("/api/price-alerts/{id}")).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body, json!({ "message": "Alert deleted" }));
    assert_eq!(app.count(Collection::PriceAlerts).await, 1);
}

#[tokio::test]
async fn test_price_alert_rejects_invalid_email() {
    let app = TestApp::new();
    let response = app
        .post(
            "/api/price-alerts",
            &json!({
                "userId": "u1",
                "productId": "p1",
                "targetPrice": 100.0,
                "email": "nope"
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.count(Collection::PriceAlerts).await, 0);
}
