use axum::extract::{Json, Query, State};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Default, Serialize, Deserialize, clap::Args)]
pub struct VerifyRequest {
    /// Token returned by a previous login
    #[arg(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
}

/// Always answers 200; validity is carried in the body.
pub async fn handler(
    State(state): State<ServiceState>,
    query: Option<Query<VerifyRequest>>,
) -> Json<VerifyResponse> {
    let token = query.and_then(|Query(req)| req.token);
    let valid = state.authenticator().verify(token.as_deref());
    tracing::debug!(valid, "token verified");
    Json(VerifyResponse { valid })
}

// Client implementation - builds request for this operation
impl ApiRequest for VerifyRequest {
    type Response = VerifyResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/verify").unwrap();
        client.get(full_url).query(&self)
    }
}
