#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use innvo_api::config::{ServerConfig, StoreBackend};
use innvo_api::router::build_app_router;
use innvo_api::service::AssetService;
use innvo_api::state::AppState;
use innvo_core::jobs::JobTrigger;
use innvo_db::store::{AssetStore, InMemoryAssetStore};
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:9000` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:9000".to_string()],
        request_timeout_secs: 30,
        store: StoreBackend::Memory,
        jobs: None,
    }
}

/// Build the full application router over `store`, optionally with a job
/// trigger, using the same middleware stack as production.
pub fn build_app(store: Arc<dyn AssetStore>, jobs: Option<JobTrigger>) -> Router {
    let config = test_config();
    let state = AppState {
        assets: AssetService::new(store),
        jobs: jobs.map(Arc::new),
    };
    build_app_router(state, &config)
}

/// Application over a fresh in-memory store with no job configured.
pub fn build_test_app() -> Router {
    build_app(Arc::new(InMemoryAssetStore::new()), None)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Header value as a string, panicking if it is missing.
pub fn header<'a>(response: &'a Response<Body>, name: &str) -> &'a str {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("missing header {name}"))
        .to_str()
        .unwrap()
}
