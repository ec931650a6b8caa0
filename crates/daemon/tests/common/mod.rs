#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use ::common::prelude::{
    AiAnalysis, Clock, CredentialVerifier, ReferenceSecret, TokenAuthenticator,
};
use jotter_daemon::classifier::{Classifier, ClassifierError};
use jotter_daemon::http_server;
use jotter_daemon::ServiceState;
use object_store::NoteStore;

pub const PASSWORD: &str = "opensesame";

/// Classifier returning a canned analysis, or failing when given none.
pub struct MockClassifier(pub Option<AiAnalysis>);

#[async_trait]
impl Classifier for MockClassifier {
    async fn analyze(&self, _content: &str) -> Result<AiAnalysis, ClassifierError> {
        self.0.clone().ok_or(ClassifierError::EmptyResponse)
    }
}

pub struct TestApp {
    pub router: Router,
    pub notes: NoteStore,
}

pub struct TestAppBuilder {
    secret: Option<ReferenceSecret>,
    max_age: Option<std::time::Duration>,
    login_clock: Option<Arc<dyn Clock>>,
    verify_clock: Option<Arc<dyn Clock>>,
    classifier: Option<Arc<dyn Classifier>>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            secret: Some(ReferenceSecret::from_password(PASSWORD)),
            max_age: None,
            login_clock: None,
            verify_clock: None,
            classifier: None,
        }
    }

    pub fn without_secret(mut self) -> Self {
        self.secret = None;
        self
    }

    pub fn max_age(mut self, max_age: std::time::Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn login_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.login_clock = Some(clock);
        self
    }

    pub fn verify_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.verify_clock = Some(clock);
        self
    }

    pub fn classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn build(self) -> TestApp {
        let mut verifier = CredentialVerifier::new(self.secret.clone());
        if let Some(clock) = self.login_clock {
            verifier = verifier.with_clock(clock);
        }
        let mut authenticator = TokenAuthenticator::new(self.secret).with_max_age(self.max_age);
        if let Some(clock) = self.verify_clock {
            authenticator = authenticator.with_clock(clock);
        }

        let notes = NoteStore::memory();
        let state = ServiceState::new(verifier, authenticator, notes.clone(), self.classifier);
        TestApp {
            router: http_server::router(state),
            notes,
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: impl Into<Body>) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap();
        self.send(request).await
    }

    /// Log in with the test password and return the token.
    pub async fn login(&self) -> String {
        let response = self
            .post_json("/login", &serde_json::json!({ "password": PASSWORD }))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());
        response.json()["token"]
            .as_str()
            .expect("token missing from login response")
            .to_string()
    }
}
