#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use namegen_service::config::UpstreamConfig;
use namegen_service::services::providers::deepseek::DeepSeekProvider;
use namegen_service::services::NameGenerator;
use namegen_service::startup::{
    build_pages_router, build_worker_router, AppState, PAGES_SERVICE, WORKER_SERVICE,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::MockServer;

pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";
pub const TEST_API_KEY: &str = "sk-test-key";
pub const GOOD_CONTENT: &str = r#"{"name":"foo-bar","description":"A tool for foo."}"#;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    pub text: String,
}

/// Generator wired to a mock upstream with the given deadline.
pub fn generator_for(upstream_url: &str, timeout: Duration) -> NameGenerator {
    let config = UpstreamConfig::new(upstream_url, TEST_API_KEY);
    let provider = DeepSeekProvider::new(&config).expect("Failed to build provider");
    NameGenerator::new(Arc::new(provider), timeout)
}

pub fn completions_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), COMPLETIONS_PATH)
}

pub fn pages_app(server: &MockServer) -> Router {
    pages_app_with_timeout(server, Duration::from_secs(30))
}

pub fn pages_app_with_timeout(server: &MockServer, timeout: Duration) -> Router {
    let generator = generator_for(&completions_url(server), timeout);
    build_pages_router(AppState::new(generator, PAGES_SERVICE))
}

pub fn worker_app(server: &MockServer) -> Router {
    let generator = generator_for(&completions_url(server), Duration::from_secs(30));
    build_worker_router(AppState::new(generator, WORKER_SERVICE))
}

/// A chat-completion reply whose first choice carries `content`.
pub fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "deepseek-chat",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 120, "completion_tokens": 24, "total_tokens": 144 }
    })
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .oneshot(builder.body(body).expect("Failed to build request"))
        .await
        .expect("Failed to execute request");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let text = String::from_utf8_lossy(&bytes).to_string();
    let body = serde_json::from_slice(&bytes).ok();

    TestResponse {
        status,
        headers,
        body,
        text,
    }
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::POST, uri, Some(body)).await
}

/// JSON bodies of every request the mock upstream received.
pub async fn upstream_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .expect("Request recording is disabled")
        .iter()
        .map(|req| serde_json::from_slice(&req.body).expect("Upstream body was not JSON"))
        .collect()
}
