use std::path::PathBuf;

use clap::Args;
use serde_json::Value;

use jotter_daemon::http_server::api::client::ApiError;
use jotter_daemon::http_server::api::PutNotesRequest;

#[derive(Args, Debug, Clone)]
pub struct Push {
    /// Token returned by a previous login
    #[arg(long, env = "JOTTER_TOKEN", hide_env_values = true)]
    pub token: String,

    /// JSON file holding the full note array; replaces what is stored
    #[arg(long)]
    pub file: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum NotesPushError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("notes file is not a JSON array: {0}")]
    NotAnArray(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Push {
    type Error = NotesPushError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let raw = tokio::fs::read(&self.file)
            .await
            .map_err(|e| NotesPushError::Read(self.file.clone(), e))?;
        let notes: Vec<Value> = serde_json::from_slice(&raw)?;
        let count = notes.len();

        let request = PutNotesRequest {
            token: Some(self.token.clone()),
            notes,
        };
        ctx.client.call(request).await?;

        Ok(format!("Pushed {} notes", count))
    }
}
