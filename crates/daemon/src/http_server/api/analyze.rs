use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use common::prelude::AiAnalysis;

use crate::classifier::ClassifierError;
use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct AnalyzeRequest {
    /// Note text to classify
    #[arg(long)]
    #[serde(default)]
    pub content: String,
}

pub type AnalyzeResponse = AiAnalysis;

pub async fn handler(
    State(state): State<ServiceState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AnalyzeError> {
    let Json(req) = body.map_err(|_| AnalyzeError::NoContent)?;
    if req.content.trim().is_empty() {
        return Err(AnalyzeError::NoContent);
    }

    let classifier = state.classifier().ok_or(AnalyzeError::NotConfigured)?;
    let analysis = classifier.analyze(&req.content).await?;
    tracing::debug!(tags = ?analysis.tags, is_todo = analysis.is_todo, "note analyzed");

    Ok(Json(analysis))
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("no content provided")]
    NoContent,
    #[error("no classifier configured")]
    NotConfigured,
    #[error("classifier error: {0}")]
    Classifier(#[from] ClassifierError),
}

impl AnalyzeError {
    /// Clients fall back to an untagged note on any failure.
    fn fallback(message: &str) -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "error": message,
            "tags": [],
            "isTodo": false,
        }))
    }
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        match self {
            AnalyzeError::NoContent => (
                http::StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "No content provided" })),
            )
                .into_response(),
            AnalyzeError::NotConfigured => (
                http::StatusCode::SERVICE_UNAVAILABLE,
                Self::fallback("Classifier not configured"),
            )
                .into_response(),
            AnalyzeError::Classifier(e) => {
                tracing::error!("ANALYZE ERROR: {:?}", e);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    Self::fallback("Failed to analyze note"),
                )
                    .into_response()
            }
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for AnalyzeRequest {
    type Response = AnalyzeResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/analyze").unwrap();
        client.post(full_url).json(&self)
    }
}
