use std::fmt;

use clap::Args;

use common::prelude::digest;

#[derive(Args, Clone)]
pub struct HashPassword {
    /// Password to hash
    #[arg(long, env = "JOTTER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl fmt::Debug for HashPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashPassword").finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HashPasswordError {
    #[error("password must not be empty")]
    EmptyPassword,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for HashPassword {
    type Error = HashPasswordError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        if self.password.trim().is_empty() {
            return Err(HashPasswordError::EmptyPassword);
        }
        Ok(digest(self.password.as_bytes()))
    }
}
