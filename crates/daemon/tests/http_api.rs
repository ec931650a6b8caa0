mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;

use ::common::prelude::{AiAnalysis, FixedClock, ResourceType, Token};
use crate::common::{MockClassifier, TestAppBuilder, PASSWORD};

const TOKEN_SHAPE_TIMESTAMP_DIGITS: usize = 13;

#[tokio::test]
async fn test_login_issues_verifiable_token() {
    let app = TestAppBuilder::new().build();

    let response = app
        .post_json("/login", &json!({ "password": PASSWORD }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["success"], json!(true));

    let token = body["token"].as_str().unwrap();
    let (issued_at, signature) = token.split_once('.').unwrap();
    assert_eq!(issued_at.len(), TOKEN_SHAPE_TIMESTAMP_DIGITS);
    assert_eq!(signature.len(), 64);
    assert!(token.parse::<Token>().is_ok());

    let response = app.get(&format!("/verify?token={}", token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "valid": true }));
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestAppBuilder::new().build();

    let response = app
        .post_json("/login", &json!({ "password": "wrongpass" }))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json(), json!({ "error": "Invalid password" }));

    for body in [json!({ "password": "" }), json!({ "password": "   " }), json!({})] {
        let response = app.post_json("/login", &body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json(), json!({ "error": "Password required" }));
    }

    let response = app.post_raw("/login", "not json").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_without_reference_secret_is_a_server_error() {
    let app = TestAppBuilder::new().without_secret().build();

    let response = app
        .post_json("/login", &json!({ "password": PASSWORD }))
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json(),
        json!({ "error": "Server configuration error" })
    );
}

#[tokio::test]
async fn test_verify_never_fails() {
    let app = TestAppBuilder::new().build();

    for uri in [
        "/verify",
        "/verify?token=",
        "/verify?token=garbage",
        "/verify?token=1.2.3",
        "/verify?token=1700000000000.zz",
        "/verify?token=.abc",
        "/verify?other=1",
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::OK, "{}", uri);
        assert_eq!(response.json(), json!({ "valid": false }), "{}", uri);
    }

    let unconfigured = TestAppBuilder::new().without_secret().build();
    let token = Token::mint(1_700_000_000_000, b"anything").to_string();
    let response = unconfigured.get(&format!("/verify?token={}", token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "valid": false }));
}

#[tokio::test]
async fn test_get_notes_before_any_save_is_empty() {
    let app = TestAppBuilder::new().build();
    let token = app.login().await;

    let response = app.get(&format!("/notes?token={}", token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn test_get_notes_requires_token() {
    let app = TestAppBuilder::new().build();

    for uri in ["/notes", "/notes?token=garbage", "/notes?token=1.abc"] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(response.text(), "Unauthorized");
    }

    let unconfigured = TestAppBuilder::new().without_secret().build();
    let response = unconfigured.get("/notes?token=1.abc").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "Config Error");
}

#[tokio::test]
async fn test_put_then_get_round_trip() {
    let app = TestAppBuilder::new().build();
    let token = app.login().await;

    let notes = json!([
        {"id": "1", "content": "read dune", "timestamp": 1700000000000u64,
         "aiAnalysis": {"tags": ["book"], "isTodo": true, "isResource": true, "resourceType": "read"}},
        {"id": "2", "content": "second", "timestamp": 1700000000001u64, "isProcessing": false}
    ]);
    let response = app
        .post_json("/notes", &json!({ "token": token, "notes": notes }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "success": true }));

    let response = app.get(&format!("/notes?token={}", token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), notes);

    // a later save replaces the collection wholesale
    let response = app
        .post_json("/notes", &json!({ "token": token, "notes": [] }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let response = app.get(&format!("/notes?token={}", token)).await;
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn test_put_rejects_non_array_and_leaves_store_untouched() {
    let app = TestAppBuilder::new().build();
    let token = app.login().await;

    let original = json!([{"id": "1", "content": "keep me", "timestamp": 1}]);
    app.post_json("/notes", &json!({ "token": token, "notes": original }))
        .await;

    for bad in [
        json!({ "token": token, "notes": "not-an-array" }),
        json!({ "token": token, "notes": {"id": "1"} }),
        json!({ "token": token }),
    ] {
        let response = app.post_json("/notes", &bad).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.text(), "Invalid data");
    }

    assert_eq!(
        app.notes.load_notes().await.unwrap(),
        original.as_array().unwrap().clone()
    );
}

#[tokio::test]
async fn test_put_checks_token_before_shape() {
    let app = TestAppBuilder::new().build();

    let response = app
        .post_json("/notes", &json!({ "token": "garbage", "notes": "not-an-array" }))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.post_json("/notes", &json!({ "notes": [] })).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.post_raw("/notes", "{not json").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    assert!(app.notes.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_put_without_reference_secret_is_unauthorized() {
    let app = TestAppBuilder::new().without_secret().build();
    let token = Token::mint(1_700_000_000_000, b"").to_string();

    let response = app
        .post_json("/notes", &json!({ "token": token, "notes": [] }))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let issued_at = 1_700_000_000_000;
    let app = TestAppBuilder::new()
        .max_age(Duration::from_secs(60))
        .login_clock(Arc::new(FixedClock(issued_at)))
        .verify_clock(Arc::new(FixedClock(issued_at + 120_000)))
        .build();
    let token = app.login().await;

    let response = app.get(&format!("/verify?token={}", token)).await;
    assert_eq!(response.json(), json!({ "valid": false }));
    let response = app.get(&format!("/notes?token={}", token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let fresh = TestAppBuilder::new()
        .max_age(Duration::from_secs(60))
        .login_clock(Arc::new(FixedClock(issued_at)))
        .verify_clock(Arc::new(FixedClock(issued_at + 30_000)))
        .build();
    let token = fresh.login().await;
    let response = fresh.get(&format!("/verify?token={}", token)).await;
    assert_eq!(response.json(), json!({ "valid": true }));
}

#[tokio::test]
async fn test_analyze() {
    let analysis = AiAnalysis {
        tags: vec!["book".into()],
        is_todo: true,
        is_resource: true,
        resource_type: Some(ResourceType::Read),
        summary: None,
    };
    let app = TestAppBuilder::new()
        .classifier(Arc::new(MockClassifier(Some(analysis))))
        .build();

    let response = app
        .post_json("/analyze", &json!({ "content": "read dune this weekend" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({"tags": ["book"], "isTodo": true, "isResource": true, "resourceType": "read"})
    );

    let response = app.post_json("/analyze", &json!({ "content": "" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({ "error": "No content provided" }));
}

#[tokio::test]
async fn test_analyze_failures_fall_back() {
    let failing = TestAppBuilder::new()
        .classifier(Arc::new(MockClassifier(None)))
        .build();
    let response = failing
        .post_json("/analyze", &json!({ "content": "hello" }))
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json();
    assert_eq!(body["tags"], json!([]));
    assert_eq!(body["isTodo"], json!(false));
    assert!(body["error"].is_string());

    let unconfigured = TestAppBuilder::new().build();
    let response = unconfigured
        .post_json("/analyze", &json!({ "content": "hello" }))
        .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json()["tags"], json!([]));
}

#[tokio::test]
async fn test_status_routes() {
    let app = TestAppBuilder::new().build();

    let response = app.get("/_status/livez").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "status": "ok" }));

    let response = app.get("/_status/readyz").await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get("/_status/version").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.json()["version"].is_string());

    let response = app.get("/nope").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = TestAppBuilder::new().build();

    let request = Request::builder()
        .uri("/verify")
        .header(header::ORIGIN, "https://notes.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response
            .headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
