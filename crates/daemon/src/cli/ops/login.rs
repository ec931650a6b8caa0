use clap::Args;

use jotter_daemon::http_server::api::client::ApiError;
use jotter_daemon::http_server::api::LoginRequest;

#[derive(Args, Debug, Clone)]
pub struct Login {
    #[command(flatten)]
    pub request: LoginRequest,
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Login {
    type Error = LoginError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let response = ctx.client.call(self.request.clone()).await?;
        Ok(response.token)
    }
}
