//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, page_handler, replay_handler, retrieve_handler, stats_handler, store_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /store` - Store a value under a fresh key
/// - `GET /retrieve/:key` - Retrieve a value by key
/// - `GET /replay/:operation` - Recorded call log of an operation
/// - `GET /page?url=` - Fetch a page through the expiring cache
/// - `GET /stats` - Get store statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/store", post(store_handler))
        .route("/retrieve/:key", get(retrieve_handler))
        .route("/replay/:operation", get(replay_handler))
        .route("/page", get(page_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::web::{FetchResponse, PageFetcher};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tower::util::ServiceExt;

    struct NotFoundFetcher;

    #[async_trait]
    impl PageFetcher for NotFoundFetcher {
        async fn fetch(&self, _url: &str) -> crate::error::Result<FetchResponse> {
            Ok(FetchResponse::new(404, "missing"))
        }
    }

    async fn create_test_app() -> Router {
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            Arc::new(NotFoundFetcher),
            Duration::from_secs(10),
        )
        .await
        .unwrap();
        create_router(state)
    }

    async fn get_status(uri: &str) -> StatusCode {
        create_test_app()
            .await
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(get_status("/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        assert_eq!(get_status("/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_store_endpoint() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/store")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"value":{"type":"text","value":"hello"}}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_retrieve_not_found() {
        assert_eq!(get_status("/retrieve/nonexistent").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_replay_store() {
        assert_eq!(get_status("/replay/store").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_page_fetch_failure_is_bad_gateway() {
        assert_eq!(
            get_status("/page?url=http%3A%2F%2Fexample.com").await,
            StatusCode::BAD_GATEWAY
        );
    }
}
