use axum::extract::{Json, Query, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use common::prelude::AuthError;
use object_store::BlobStoreError;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Default, Serialize, Deserialize, clap::Args)]
pub struct GetNotesRequest {
    /// Token returned by a previous login
    #[arg(long, env = "JOTTER_TOKEN", hide_env_values = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

pub async fn handler(
    State(state): State<ServiceState>,
    query: Option<Query<GetNotesRequest>>,
) -> Result<impl IntoResponse, GetNotesError> {
    if !state.authenticator().is_configured() {
        return Err(GetNotesError::Configuration);
    }

    let token = query.and_then(|Query(req)| req.token);
    state.authenticator().authorize(token.as_deref())?;

    let notes = state.notes().load_notes().await?;
    tracing::debug!(count = notes.len(), "notes loaded");
    Ok(Json(notes))
}

#[derive(Debug, thiserror::Error)]
pub enum GetNotesError {
    #[error("reference password hash is not configured")]
    Configuration,
    #[error("unauthorized")]
    Unauthorized,
    #[error("note store error: {0}")]
    Store(#[from] BlobStoreError),
}

impl From<AuthError> for GetNotesError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingConfiguration => GetNotesError::Configuration,
            _ => GetNotesError::Unauthorized,
        }
    }
}

impl IntoResponse for GetNotesError {
    fn into_response(self) -> Response {
        match self {
            GetNotesError::Configuration => {
                tracing::error!("GET NOTES ERROR: reference password hash is not configured");
                (http::StatusCode::INTERNAL_SERVER_ERROR, "Config Error").into_response()
            }
            GetNotesError::Unauthorized => {
                tracing::debug!("GET NOTES: token rejected");
                (http::StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
            }
            GetNotesError::Store(e) => {
                tracing::error!("GET NOTES ERROR: {:?}", e);
                (http::StatusCode::INTERNAL_SERVER_ERROR, "Storage Error").into_response()
            }
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for GetNotesRequest {
    type Response = Vec<Value>;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/notes").unwrap();
        client.get(full_url).query(&self)
    }
}
