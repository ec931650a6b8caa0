use clap::Args;

use jotter_daemon::http_server::api::client::ApiError;
use jotter_daemon::http_server::api::GetNotesRequest;

#[derive(Args, Debug, Clone)]
pub struct Pull {
    #[command(flatten)]
    pub request: GetNotesRequest,
}

#[derive(Debug, thiserror::Error)]
pub enum NotesPullError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("failed to encode notes: {0}")]
    Encode(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Pull {
    type Error = NotesPullError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let notes = ctx.client.call(self.request.clone()).await?;
        Ok(serde_json::to_string_pretty(&notes)?)
    }
}
