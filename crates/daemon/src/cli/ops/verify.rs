use clap::Args;

use jotter_daemon::http_server::api::client::ApiError;
use jotter_daemon::http_server::api::VerifyRequest;

#[derive(Args, Debug, Clone)]
pub struct Verify {
    #[command(flatten)]
    pub request: VerifyRequest,
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Verify {
    type Error = VerifyError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.client.call(self.request.clone()).await?;
        let verdict = if response.valid { "valid" } else { "invalid" };
        Ok(verdict.to_string())
    }
}
