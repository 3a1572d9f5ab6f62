#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use dishduty_core::clock::FixedClock;
use dishduty_core::memory_store::MemoryStore;
use dishduty_core::types::Day;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use dishduty_api::auth::AdminSecret;
use dishduty_api::config::ServerConfig;
use dishduty_api::router::build_app_router;
use dishduty_api::state::AppState;

/// Admin secret configured on every test app unless overridden.
pub const ADMIN_PASSWORD: &str = "test-admin";

/// The day every test app treats as "today".
pub fn today() -> Day {
    Day::from_ymd_opt(2024, 2, 2).unwrap()
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(admin_password: Option<&str>) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        admin_password: admin_password.map(String::from),
        seed_workers: vec![],
        startup_resolve_delay_secs: 0,
    }
}

/// A router plus direct access to its backing store for arranging and
/// inspecting state.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Full application router on an empty in-memory store, with the
/// production middleware stack, pinned to [`today`].
pub fn build_test_app() -> TestApp {
    build_test_app_with(today(), Some(ADMIN_PASSWORD))
}

pub fn build_test_app_with(today: Day, admin_password: Option<&str>) -> TestApp {
    let config = test_config(admin_password);
    let store = Arc::new(MemoryStore::new());

    let state = AppState {
        store: store.clone(),
        clock: Arc::new(FixedClock(today)),
        config: Arc::new(config.clone()),
        admin: Arc::new(AdminSecret::new(config.admin_password.clone())),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_with_header(app: Router, uri: &str, name: &str, value: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(name, value)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response {
    send_json(app, Method::PATCH, uri, body).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
