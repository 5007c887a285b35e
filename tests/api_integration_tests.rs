//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mini_cache::{
    api::create_router,
    store::MemoryStore,
    web::{FetchResponse, PageFetcher},
    AppState, CacheError,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

/// Serves "ok" for any URL except those containing "broken", counting calls.
#[derive(Default)]
struct CountingFetcher {
    calls: AtomicUsize,
}

#[async_trait]
impl PageFetcher for CountingFetcher {
    async fn fetch(&self, url: &str) -> mini_cache::Result<FetchResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if url.contains("broken") {
            Err(CacheError::Fetch("connection reset".to_string()))
        } else {
            Ok(FetchResponse::new(200, format!("page at {}", url)))
        }
    }
}

async fn create_test_app_with(fetcher: Arc<CountingFetcher>, page_ttl: Duration) -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()), fetcher, page_ttl)
        .await
        .unwrap();
    create_router(state)
}

async fn create_test_app() -> Router {
    create_test_app_with(Arc::new(CountingFetcher::default()), Duration::from_secs(10)).await
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn store(app: &Router, value_json: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/store")
                .header("content-type", "application/json")
                .body(Body::from(format!(r#"{{"value":{}}}"#, value_json)))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    json["key"].as_str().unwrap().to_string()
}

// == STORE / RETRIEVE Endpoint Tests ==

#[tokio::test]
async fn test_store_and_retrieve_text() {
    let app = create_test_app().await;

    let key = store(&app, r#"{"type":"text","value":"hello"}"#).await;
    assert_eq!(key.len(), 36);

    let (status, json) = get(&app, &format!("/retrieve/{}", key)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], key.as_str());
    assert_eq!(json["value"]["type"], "text");
    assert_eq!(json["value"]["value"], "hello");
}

#[tokio::test]
async fn test_store_and_retrieve_integer() {
    let app = create_test_app().await;

    let key = store(&app, r#"{"type":"integer","value":42}"#).await;

    let (status, json) = get(&app, &format!("/retrieve/{}?as=integer", key)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"]["value"], 42);
}

#[tokio::test]
async fn test_retrieve_text_as_integer_is_decode_error() {
    let app = create_test_app().await;

    let key = store(&app, r#"{"type":"text","value":"forty-two"}"#).await;

    let (status, json) = get(&app, &format!("/retrieve/{}?as=integer", key)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"].as_str().unwrap().contains("Decode error"));
}

#[tokio::test]
async fn test_retrieve_not_found() {
    let app = create_test_app().await;

    let (status, json) = get(&app, "/retrieve/never-stored").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_store_invalid_body() {
    let app = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/store")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"value":"untagged"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == REPLAY Endpoint Tests ==

#[tokio::test]
async fn test_replay_fresh_cache() {
    let app = create_test_app().await;

    let (status, json) = get(&app, "/replay/store").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 0);
    assert_eq!(json["lines"], serde_json::json!(["store was called 0 times:"]));
}

#[tokio::test]
async fn test_replay_after_three_stores() {
    let app = create_test_app().await;

    let k1 = store(&app, r#"{"type":"text","value":"foo"}"#).await;
    let k2 = store(&app, r#"{"type":"text","value":"bar"}"#).await;
    let k3 = store(&app, r#"{"type":"integer","value":42}"#).await;

    let (status, json) = get(&app, "/replay/store").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 3);
    assert_eq!(
        json["lines"],
        serde_json::json!([
            "store was called 3 times:",
            format!("store(*(\"foo\",)) -> {}", k1),
            format!("store(*(\"bar\",)) -> {}", k2),
            format!("store(*(42,)) -> {}", k3),
        ])
    );
}

#[tokio::test]
async fn test_replay_unknown_operation() {
    let app = create_test_app().await;

    let (status, _) = get(&app, "/replay/retrieve").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == PAGE Endpoint Tests ==

#[tokio::test]
async fn test_page_is_cached_and_counted() {
    let fetcher = Arc::new(CountingFetcher::default());
    let app = create_test_app_with(fetcher.clone(), Duration::from_secs(10)).await;

    let (status, first) = get(&app, "/page?url=http%3A%2F%2Fexample.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["body"], "page at http://example.com");
    assert_eq!(first["access_count"], 1);

    let (_, second) = get(&app, "/page?url=http%3A%2F%2Fexample.com").await;
    assert_eq!(second["access_count"], 2);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_page_refetched_after_ttl() {
    let fetcher = Arc::new(CountingFetcher::default());
    let app = create_test_app_with(fetcher.clone(), Duration::from_millis(200)).await;

    get(&app, "/page?url=http%3A%2F%2Fexample.com").await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    let (_, json) = get(&app, "/page?url=http%3A%2F%2Fexample.com").await;

    assert_eq!(json["access_count"], 2);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_page_failure_is_not_cached() {
    let fetcher = Arc::new(CountingFetcher::default());
    let app = create_test_app_with(fetcher.clone(), Duration::from_secs(10)).await;

    let (first, _) = get(&app, "/page?url=http%3A%2F%2Fbroken.example").await;
    let (second, _) = get(&app, "/page?url=http%3A%2F%2Fbroken.example").await;

    assert_eq!(first, StatusCode::BAD_GATEWAY);
    assert_eq!(second, StatusCode::BAD_GATEWAY);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_page_empty_url() {
    let app = create_test_app().await;

    let (status, _) = get(&app, "/page?url=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// == STATS / HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_stats_track_reads() {
    let app = create_test_app().await;

    let key = store(&app, r#"{"type":"text","value":"x"}"#).await;
    get(&app, &format!("/retrieve/{}", key)).await;
    get(&app, "/retrieve/missing").await;

    let (status, json) = get(&app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["hits"].as_u64().unwrap() >= 1);
    assert!(json["misses"].as_u64().unwrap() >= 1);
    assert!(json.get("hit_rate").is_some());
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app().await;

    let (status, json) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}
