//! Integration tests for admin analytics.

use axum::http::StatusCode;
use serde_json::json;

use smartdeal_integration_tests::{TestApp, pluck};

#[tokio::test]
async fn test_empty_store_analytics() {
    let app = TestApp::new();
    let response = app.get("/api/admin/analytics").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "totalProducts": 0,
            "totalUsers": 0,
            "totalWishlists": 0,
            "totalCarts": 0,
            "totalAlerts": 0,
            "topBrands": [],
            "recentActivity": []
        })
    );
}

#[tokio::test]
async fn test_analytics_after_activity() {
    let app = TestApp::seeded().await;

    app.post(
        "/api/users",
        &json!({ "email": "asha@example.com", "name": "Asha", "firebaseUid": "fb-asha" }),
    )
    .await;
    app.post("/api/wishlist", &json!({ "userId": "u1", "productId": "p1" }))
        .await;
    app.post(
        "/api/cart",
        &json!({ "userId": "u1", "productId": "p1", "selectedStore": "Amazon" }),
    )
    .await;
    for target in [50_000.0, 60_000.0] {
        app.post(
            "/api/price-alerts",
            &json!({
                "userId": "u1",
                "productId": "p1",
                "targetPrice": target,
                "email": "asha@example.com"
            }),
        )
        .await;
    }

    let response = app.get("/api/admin/analytics").await;
    let body = &response.body;
    assert_eq!(body["totalProducts"], json!(8));
    assert_eq!(body["totalUsers"], json!(1));
    assert_eq!(body["totalWishlists"], json!(1));
    assert_eq!(body["totalCarts"], json!(1));
    assert_eq!(body["totalAlerts"], json!(2));

    // Every demo brand appears once; ties keep catalog order.
    assert_eq!(
        pluck(&body["topBrands"], "brand"),
        vec!["Samsung", "Apple", "OnePlus", "Xiaomi", "Google"]
    );
    assert_eq!(body["topBrands"][0]["count"], json!(1));

    let activity = body["recentActivity"].as_array().cloned().unwrap_or_default();
    assert_eq!(activity.len(), 2);
    assert!(activity.iter().all(|entry| entry["type"] == "alert"));
    assert_eq!(activity[0]["data"]["userId"], "u1");
}
