//! Integration tests for SmartDeal Hub.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p smartdeal-integration-tests
//! ```
//!
//! Every test builds the full router over a fresh in-memory store, so no
//! database is needed. Most tests drive the router in-process; the live
//! server helper binds an ephemeral port for tests that need real HTTP.
//!
//! # Test Categories
//!
//! - `catalog` - Product search and seeding
//! - `users` - Registration and lookup
//! - `relationships` - Wishlist, cart and price alerts
//! - `admin` - Analytics
//! - `server` - Health checks and CORS over a real socket

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use smartdeal_api::config::ApiConfig;
use smartdeal_api::db::{Collection, DocumentStore, Filter, MemoryDocumentStore};
use smartdeal_api::state::AppState;

/// Status and decoded body of a response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// JSON body, a string for non-JSON bodies, or `Null` when empty.
    pub body: Value,
}

/// The full application over an in-memory store.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
    store: Arc<MemoryDocumentStore>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Build an app over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(MemoryDocumentStore::new());
        let state = AppState::new(ApiConfig::in_memory(), store.clone());
        Self {
            router: smartdeal_api::app(state),
            store,
        }
    }

    /// Build an app and load the demo catalog through the admin endpoint.
    pub async fn seeded() -> Self {
        let app = Self::new();
        let response = app.post_empty("/api/admin/seed-products").await;
        assert_eq!(response.status, StatusCode::OK, "seed failed: {response:?}");
        app
    }

    /// Number of documents in `collection`.
    pub async fn count(&self, collection: Collection) -> u64 {
        self.store
            .count_documents(collection, &Filter::All)
            .await
            .expect("count failed")
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, Body::empty(), None).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, Body::empty(), None).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post(&self, uri: &str, body: &Value) -> TestResponse {
        self.post_raw(uri, &body.to_string()).await
    }

    /// Send a POST request with a raw body labelled as JSON.
    pub async fn post_raw(&self, uri: &str, body: &str) -> TestResponse {
        self.send(
            Method::POST,
            uri,
            Body::from(body.to_owned()),
            Some("application/json"),
        )
        .await
    }

    /// Send a POST request without a body.
    pub async fn post_empty(&self, uri: &str) -> TestResponse {
        self.send(Method::POST, uri, Body::empty(), None).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Body,
        content_type: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(body).expect("invalid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse { status, body }
    }
}

/// Serve the app on an ephemeral local port and return its base URL.
pub async fn spawn_server(config: ApiConfig) -> String {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
    let app = smartdeal_api::app(AppState::new(config, store));

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("failed to bind");
    let addr = listener.local_addr().expect("no local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });

    format!("http://{addr}")
}

/// Fetch a string field from a JSON object.
#[must_use]
pub fn str_field<'a>(value: &'a Value, field: &str) -> &'a str {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
}

/// Collect one string field from every element of a JSON array.
#[must_use]
pub fn pluck<'a>(value: &'a Value, field: &str) -> Vec<&'a str> {
    value
        .as_array()
        .map(|items| items.iter().map(|item| str_field(item, field)).collect())
        .unwrap_or_default()
}
