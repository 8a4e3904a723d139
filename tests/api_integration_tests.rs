//! Integration Tests for the Key-Value Front-End
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use redis_http::{api::create_store_router, AppState, KvStore, MemoryStore, RedisStore};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone());
    (create_store_router(state), store)
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// == SET Endpoint Tests ==

#[tokio::test]
async fn test_set_endpoint_success() {
    let (app, store) = create_test_app();

    let (status, json) = send(&app, "POST", "/set/foo/bar").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json, json!({ "message": "Value set successfully" }));
    assert_eq!(store.get("foo").await.unwrap(), Some("bar".to_string()));
}

#[tokio::test]
async fn test_set_endpoint_overwrites() {
    let (app, _) = create_test_app();

    send(&app, "POST", "/set/foo/first").await;
    let (status, _) = send(&app, "POST", "/set/foo/second").await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, json) = send(&app, "GET", "/get/foo").await;
    assert_eq!(json["value"], "second");
}

#[tokio::test]
async fn test_set_endpoint_percent_encoded() {
    let (app, _) = create_test_app();

    let (status, _) = send(&app, "POST", "/set/greeting/hello%20world").await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, json) = send(&app, "GET", "/get/greeting").await;
    assert_eq!(json["value"], "hello world");
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_set_then_get_scenario() {
    let (app, _) = create_test_app();

    let (status, _) = send(&app, "POST", "/set/foo/bar").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send(&app, "GET", "/get/foo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "key": "foo", "value": "bar" }));

    let (status, json) = send(&app, "GET", "/get/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "message": "Key not found" }));
}

#[tokio::test]
async fn test_get_endpoint_empty_value() {
    let (app, store) = create_test_app();
    store.set("blank", "").await.unwrap();

    let (status, json) = send(&app, "GET", "/get/blank").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "key": "blank", "value": "" }));
}

// == LIST Endpoint Tests ==

#[tokio::test]
async fn test_list_endpoint_empty() {
    let (app, _) = create_test_app();

    let (status, json) = send(&app, "GET", "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({}));
}

#[tokio::test]
async fn test_list_endpoint_returns_all_pairs() {
    let (app, store) = create_test_app();

    send(&app, "POST", "/set/a/1").await;
    send(&app, "POST", "/set/b/2").await;
    // Written behind the API's back; still listed
    store.set("c", "3").await.unwrap();

    let (status, json) = send(&app, "GET", "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "a": "1", "b": "2", "c": "3" }));
}

#[tokio::test]
async fn test_list_includes_counter_entries() {
    let (app, store) = create_test_app();
    store.incr("hits").await.unwrap();

    let (_, json) = send(&app, "GET", "/").await;
    assert_eq!(json, json!({ "hits": "1" }));
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app();

    let (status, json) = send(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Store Failure Tests ==

fn create_unreachable_app() -> Router {
    // Nothing listens on port 1; the store only dials on first use
    let store = RedisStore::open("redis://127.0.0.1:1/0").unwrap();
    create_store_router(AppState::new(Arc::new(store)))
}

#[tokio::test]
async fn test_unreachable_store_is_500_on_every_route() {
    let app = create_unreachable_app();

    for (method, uri) in [("GET", "/"), ("POST", "/set/foo/bar"), ("GET", "/get/foo")] {
        let (status, json) = send(&app, method, uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        assert!(json["error"].is_string(), "{} {}", method, uri);
    }
}

#[tokio::test]
async fn test_unreachable_store_health_is_503() {
    let app = create_unreachable_app();

    let (status, json) = send(&app, "GET", "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], "unhealthy");
}

// == Routing Tests ==

#[tokio::test]
async fn test_unknown_path_not_found() {
    let (app, _) = create_test_app();

    let (status, _) = send(&app, "GET", "/notfound").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_set_missing_value_not_found() {
    let (app, _) = create_test_app();

    let (status, _) = send(&app, "POST", "/set/only-key").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
