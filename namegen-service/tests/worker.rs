//! The worker deployment answers the same contract on any path.

mod common;

use axum::http::{header, Method, StatusCode};
use common::*;
use namegen_service::handlers::generate::MAX_BODY_BYTES;
use namegen_service::startup::GENERATE_NAME_PATH;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn generates_on_any_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(GOOD_CONTENT)))
        .expect(2)
        .mount(&server)
        .await;

    for uri in ["/", "/api/generate-name"] {
        let response = post_json(
            worker_app(&server),
            uri,
            json!({ "description": "A key-value store", "mustInclude": "cache" }),
        )
        .await;

        assert_eq!(response.status, StatusCode::OK, "path {}", uri);
        assert_eq!(response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(response.body.unwrap()["data"]["name"], "foo-bar");
    }
}

#[tokio::test]
async fn rejects_get_and_answers_preflight_at_root() {
    let server = MockServer::start().await;

    let response = send(worker_app(&server), Method::OPTIONS, "/", None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "Content-Type, Authorization"
    );

    let response = send(worker_app(&server), Method::GET, "/", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body.unwrap()["error"], "Method GET not allowed");

    let response = send(worker_app(&server), Method::DELETE, "/anything", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body.unwrap()["error"], "Method DELETE not allowed");
}

#[tokio::test]
async fn probe_paths_still_reach_handler_for_post() {
    let server = MockServer::start().await;

    let response = post_json(worker_app(&server), "/health", json!({})).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body.unwrap()["error"], "Description is required");
}

#[tokio::test]
async fn invalid_json_body_is_internal_error() {
    let server = MockServer::start().await;

    let response = send(worker_app(&server), Method::POST, "/", None).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.body.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn oversized_body_matches_pages_envelope() {
    let server = MockServer::start().await;
    let oversized = json!({ "description": "x".repeat(MAX_BODY_BYTES + 1024) });

    let worker = post_json(worker_app(&server), "/", oversized.clone()).await;
    let pages = post_json(pages_app(&server), GENERATE_NAME_PATH, oversized).await;

    assert_eq!(worker.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(worker.status, pages.status);
    assert_eq!(worker.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(worker.body, pages.body);
    assert!(server.received_requests().await.unwrap().is_empty());
}
