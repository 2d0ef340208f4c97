use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::v1;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Build the HTTP router, mounting the Prometheus endpoint when metrics are enabled
pub fn create_router(state: AppState, metrics: Option<(PrometheusMetrics, &str)>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .nest("/v1", v1::create_v1_router())
        .with_state(state);

    if let Some((metrics, path)) = metrics {
        router = router.merge(create_metrics_router(metrics, path));
    }

    router.layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::cache::MockExactCache;
    use crate::domain::embedding::MockEmbedder;
    use crate::domain::llm::MockGenerator;
    use crate::domain::semantic_cache::MockSemanticCache;
    use crate::domain::{Generator, QueryRouter};
    use crate::infrastructure::cache::InMemoryExactCache;
    use crate::infrastructure::embedding::HashingEmbedder;
    use crate::infrastructure::llm::EchoGenerator;
    use crate::infrastructure::semantic_cache::InMemorySemanticCache;

    fn offline_app() -> Router {
        let router = QueryRouter::builder()
            .exact_cache(Arc::new(InMemoryExactCache::new()))
            .semantic_cache(Arc::new(InMemorySemanticCache::default()))
            .embedder(Arc::new(HashingEmbedder::default()))
            .generator(Arc::new(EchoGenerator::new()))
            .build()
            .unwrap();

        create_router(AppState::new(router), None)
    }

    fn app_with_generator(generator: Arc<dyn Generator>) -> Router {
        let router = QueryRouter::builder()
            .exact_cache(Arc::new(MockExactCache::new()))
            .semantic_cache(Arc::new(MockSemanticCache::new()))
            .embedder(Arc::new(MockEmbedder::default()))
            .generator(generator)
            .build()
            .unwrap();

        create_router(AppState::new(router), None)
    }

    fn post_query(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/query")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_query_generates_then_hits_exact_cache() {
        let app = offline_app();

        let first = app
            .clone()
            .oneshot(post_query(json!({"prompt": "What is 2+2?"})))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let first = body_json(first).await;
        assert_eq!(first["source"], "GENERATED");
        assert_eq!(first["response"], "Mock response for: What is 2+2?");
        assert!(first["latency_ms"].as_f64().unwrap() >= 0.0);
        assert!(first.get("similarity_score").is_none());

        let second = app
            .oneshot(post_query(json!({"prompt": "  what is 2+2? "})))
            .await
            .unwrap();

        let second = body_json(second).await;
        assert_eq!(second["source"], "EXACT_HIT");
        assert_eq!(second["response"], "Mock response for: What is 2+2?");
    }

    #[tokio::test]
    async fn test_query_accepts_metadata() {
        let response = offline_app()
            .oneshot(post_query(json!({"prompt": "hi", "metadata": {"user": "u1"}})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_generation_failure_is_service_unavailable() {
        let app = app_with_generator(Arc::new(MockGenerator::new("").with_error("model not loaded")));

        let response = app
            .oneshot(post_query(json!({"prompt": "hi"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "service_unavailable_error");
        assert_eq!(body["error"]["code"], "generation");
        assert!(body["error"]["message"].as_str().unwrap().contains("model not loaded"));
    }

    #[tokio::test]
    async fn test_missing_prompt_is_client_error() {
        let response = offline_app()
            .oneshot(post_query(json!({"text": "hi"})))
            .await
            .unwrap();

        assert!(response.status().is_client_error());

        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/query")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = offline_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_reports_backends() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let response = offline_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["backends"]["exact"], "in_memory");
        assert_eq!(body["backends"]["semantic"], "in_memory");
        assert_eq!(body["backends"]["embedder"], "hashing");
        assert_eq!(body["backends"]["generator"], "echo");
    }

    #[tokio::test]
    async fn test_live() {
        let request = Request::builder().uri("/live").body(Body::empty()).unwrap();

        let response = offline_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metrics_not_mounted_when_disabled() {
        let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();

        let response = offline_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
