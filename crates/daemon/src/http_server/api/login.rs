use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::AuthError;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Clone, Serialize, Deserialize, clap::Args)]
pub struct LoginRequest {
    /// Access password
    #[arg(long, env = "JOTTER_PASSWORD", hide_env_values = true)]
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

pub async fn handler(
    State(state): State<ServiceState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, LoginError> {
    let Json(req) = body?;

    let token = state.verifier().login(&req.password)?;
    tracing::info!(issued_at = token.issued_at(), "login succeeded");

    Ok(Json(LoginResponse {
        success: true,
        token: token.to_string(),
    }))
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
    #[error("password required")]
    PasswordRequired,
    #[error("invalid password")]
    InvalidPassword,
    #[error("reference password hash is not configured")]
    Configuration,
}

impl From<AuthError> for LoginError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingConfiguration => LoginError::Configuration,
            AuthError::EmptyPassword => LoginError::PasswordRequired,
            AuthError::InvalidCredentials
            | AuthError::MalformedToken
            | AuthError::Unauthorized => LoginError::InvalidPassword,
        }
    }
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            LoginError::InvalidBody(_) => (http::StatusCode::BAD_REQUEST, "Invalid request body"),
            LoginError::PasswordRequired => (http::StatusCode::BAD_REQUEST, "Password required"),
            LoginError::InvalidPassword => (http::StatusCode::UNAUTHORIZED, "Invalid password"),
            LoginError::Configuration => {
                tracing::error!(
                    "login refused: no reference password hash configured (set {})",
                    common::auth::REFERENCE_SECRET_ENV
                );
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error",
                )
            }
        };
        if status != http::StatusCode::INTERNAL_SERVER_ERROR {
            tracing::warn!("LOGIN ERROR: {:?}", self);
        }
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for LoginRequest {
    type Response = LoginResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/login").unwrap();
        client.post(full_url).json(&self)
    }
}
