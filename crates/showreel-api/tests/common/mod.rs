//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use showreel_content::intro::default_intro;
use showreel_core::access::AccessDirectory;
use showreel_test_support::StaticAccessDirectory;
use tower::ServiceExt;

use showreel_api::routes;
use showreel_api::state::AppState;

/// Build the full app router over the built-in intro and a static directory
/// that admits `u-allowed`. Uses the same route tree as `main.rs`.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(StaticAccessDirectory::allowing(["u-allowed"])))
}

/// Build the full app router with a custom access directory.
pub fn build_test_app_with(directory: Arc<dyn AccessDirectory>) -> Router {
    routes::app(AppState::new(directory, default_intro()))
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
