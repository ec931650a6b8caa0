use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use object_store::BlobStoreError;

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutNotesRequest {
    pub token: Option<String>,
    pub notes: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutNotesResponse {
    pub success: bool,
}

/// Replace the stored collection.
///
/// The body is taken as raw JSON so the token is checked before its shape.
pub async fn handler(
    State(state): State<ServiceState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, PutNotesError> {
    let Json(body) = body?;

    let token = body.get("token").and_then(Value::as_str);
    if !state.authenticator().verify(token) {
        return Err(PutNotesError::Unauthorized);
    }

    let notes = body
        .get("notes")
        .and_then(Value::as_array)
        .ok_or(PutNotesError::InvalidData)?;

    state.notes().save_notes(notes).await?;
    tracing::info!(count = notes.len(), "notes replaced");

    Ok(Json(PutNotesResponse { success: true }))
}

#[derive(Debug, thiserror::Error)]
pub enum PutNotesError {
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
    #[error("unauthorized")]
    Unauthorized,
    #[error("notes must be an array")]
    InvalidData,
    #[error("note store error: {0}")]
    Store(#[from] BlobStoreError),
}

impl IntoResponse for PutNotesError {
    fn into_response(self) -> Response {
        match self {
            PutNotesError::InvalidBody(e) => {
                tracing::warn!("PUT NOTES ERROR: {:?}", e);
                (http::StatusCode::BAD_REQUEST, "Invalid data").into_response()
            }
            PutNotesError::Unauthorized => {
                tracing::debug!("PUT NOTES: token rejected");
                (http::StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
            }
            PutNotesError::InvalidData => {
                (http::StatusCode::BAD_REQUEST, "Invalid data").into_response()
            }
            PutNotesError::Store(e) => {
                tracing::error!("PUT NOTES ERROR: {:?}", e);
                (http::StatusCode::INTERNAL_SERVER_ERROR, "Storage Error").into_response()
            }
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for PutNotesRequest {
    type Response = PutNotesResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/notes").unwrap();
        client.post(full_url).json(&self)
    }
}
