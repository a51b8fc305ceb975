//! Integration tests over a real socket.

use reqwest::StatusCode;

use smartdeal_api::config::{ApiConfig, CorsOrigins};
use smartdeal_integration_tests::spawn_server;

#[tokio::test]
async fn test_health_endpoints() {
    let base_url = spawn_server(ApiConfig::in_memory()).await;
    let client = reqwest::Client::new();

    let live = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("health request failed");
    assert_eq!(live.status(), StatusCode::OK);
    assert_eq!(live.text().await.expect("no body"), "ok");

    let ready = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("readiness request failed");
    assert_eq!(ready.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_banner_and_request_id() {
    let base_url = spawn_server(ApiConfig::in_memory()).await;

    let response = reqwest::Client::new()
        .get(format!("{base_url}/api/"))
        .header("x-request-id", "trace-123")
        .send()
        .await
        .expect("banner request failed");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("trace-123")
    );
    let body: serde_json::Value = response.json().await.expect("invalid json");
    assert_eq!(body, serde_json::json!({ "message": "SMARTDEAL HUB API" }));
}

#[tokio::test]
async fn test_cors_origin_list() {
    let config = ApiConfig {
        cors_origins: CorsOrigins::parse("https://deals.example.com"),
        ..ApiConfig::in_memory()
    };
    let base_url = spawn_server(config).await;

    let response = reqwest::Client::new()
        .get(format!("{base_url}/api/products"))
        .header("origin", "https://deals.example.com")
        .send()
        .await
        .expect("products request failed");

    let headers = response.headers();
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("https://deals.example.com")
    );
    assert_eq!(
        headers
            .get("access-control-allow-credentials")
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}
