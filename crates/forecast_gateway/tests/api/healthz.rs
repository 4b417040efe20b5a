use std::sync::Arc;

use crate::helpers::{spawn_app, MockTmdClient};
use axum::{body::Body, http::Request};
use hyper::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn healthz_reports_running() {
    let test_app = spawn_app(Arc::new(MockTmdClient::new()));

    let response = test_app.get("/healthz").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "status": "success", "message": "Service is running" })
    );
}

#[tokio::test]
async fn healthz_never_calls_tmd() {
    let mut client = MockTmdClient::new();
    client.expect_daily_at().never();
    client.expect_daily_place().never();
    let test_app = spawn_app(Arc::new(client));

    for _ in 0..5 {
        let response = test_app.get("/healthz").await;
        assert_eq!(response.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let test_app = spawn_app(Arc::new(MockTmdClient::new()));
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/v1/weathers/daily/coordinates")
        .header("origin", "https://app.example")
        .header("access-control-request-method", "GET")
        .body(Body::empty())
        .unwrap();

    let response = test_app.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers["access-control-allow-origin"], "*");
    let methods = response.headers["access-control-allow-methods"]
        .to_str()
        .unwrap();
    assert!(methods.contains("GET"));
    assert!(methods.contains("OPTIONS"));
}
