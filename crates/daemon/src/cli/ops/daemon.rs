use std::fmt;
use std::time::Duration;

use clap::Args;

use common::prelude::ReferenceSecret;
use jotter_daemon::{spawn_service, ServiceConfig};

#[derive(Args, Clone)]
pub struct Daemon {
    /// SHA-256 hex digest of the access password
    #[arg(long, env = "REFERENCE_PASSWORD_HASH", hide_env_values = true)]
    pub reference_password_hash: Option<String>,

    /// API key for the classifier endpoint
    #[arg(long, env = "CLASSIFIER_API_KEY", hide_env_values = true)]
    pub classifier_api_key: Option<String>,

    /// Override API server port (default from config)
    #[arg(long)]
    pub api_port: Option<u16>,

    /// Directory for log files (logs to stdout only if not set)
    #[arg(long)]
    pub log_dir: Option<std::path::PathBuf>,
}

impl fmt::Debug for Daemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Daemon")
            .field("api_port", &self.api_port)
            .field("log_dir", &self.log_dir)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("state error: {0}")]
    StateError(#[from] jotter_daemon::state::StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Daemon {
    type Error = DaemonError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        // Load state from config path (or default ~/.jotter)
        let state = ctx.app_state()?;

        // A blank or missing hash still starts the daemon; logins answer 500
        let reference_secret = self
            .reference_password_hash
            .as_deref()
            .and_then(|raw| ReferenceSecret::new(raw).ok());

        let classifier = state.config.classifier.clone().map(|mut classifier| {
            classifier.api_key = self.classifier_api_key.clone();
            classifier
        });

        let config = ServiceConfig {
            reference_secret,
            token_max_age: state.config.token_max_age_secs.map(Duration::from_secs),
            store: state.config.store.clone(),
            classifier,
            api_port: self.api_port.unwrap_or(state.config.api_port),
            log_level: tracing::Level::DEBUG,
            log_dir: self.log_dir.clone(),
        };

        spawn_service(&config).await;
        Ok("daemon ended".to_string())
    }
}
