use std::path::PathBuf;

use clap::{Args, ValueEnum};

use jotter_daemon::state::{AppConfig, AppState, StateError};
use object_store::NoteStoreConfig;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// Keep notes in memory (lost on restart)
    Memory,
    /// Keep notes under the config directory, or --store-path
    #[default]
    Local,
    /// Keep notes in an S3-compatible bucket
    S3,
}

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// API server port
    #[arg(long, default_value_t = 5001)]
    pub api_port: u16,

    /// Reject tokens older than this many seconds (tokens never expire if unset)
    #[arg(long)]
    pub token_max_age_secs: Option<u64>,

    /// Note storage backend
    #[arg(long, value_enum, default_value_t = StoreKind::Local)]
    pub store: StoreKind,

    /// Directory for the local store (defaults to <config dir>/notes)
    #[arg(long)]
    pub store_path: Option<PathBuf>,

    /// S3 endpoint URL (e.g., http://localhost:9000 for MinIO)
    #[arg(long, required_if_eq("store", "s3"))]
    pub s3_endpoint: Option<String>,

    /// S3 bucket name
    #[arg(long, required_if_eq("store", "s3"))]
    pub s3_bucket: Option<String>,

    /// S3 access key ID
    #[arg(long, env = "S3_ACCESS_KEY", hide_env_values = true)]
    pub s3_access_key: Option<String>,

    /// S3 secret access key
    #[arg(long, env = "S3_SECRET_KEY", hide_env_values = true)]
    pub s3_secret_key: Option<String>,

    /// S3 region (defaults to us-east-1)
    #[arg(long)]
    pub s3_region: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] StateError),
    #[error("missing S3 option: --{0}")]
    MissingS3Option(&'static str),
}

impl Init {
    fn store_config(&self) -> Result<NoteStoreConfig, InitError> {
        let store = match self.store {
            StoreKind::Memory => NoteStoreConfig::Memory,
            // an empty path is filled in with <config dir>/notes by AppState::init
            StoreKind::Local => NoteStoreConfig::Local {
                path: self.store_path.clone().unwrap_or_default(),
            },
            StoreKind::S3 => NoteStoreConfig::S3 {
                endpoint: required(&self.s3_endpoint, "s3-endpoint")?,
                access_key: required(&self.s3_access_key, "s3-access-key")?,
                secret_key: required(&self.s3_secret_key, "s3-secret-key")?,
                bucket: required(&self.s3_bucket, "s3-bucket")?,
                region: self.s3_region.clone(),
            },
        };
        Ok(store)
    }
}

fn required(value: &Option<String>, flag: &'static str) -> Result<String, InitError> {
    value.clone().ok_or(InitError::MissingS3Option(flag))
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            api_port: self.api_port,
            token_max_age_secs: self.token_max_age_secs,
            store: self.store_config()?,
            classifier: None,
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let store = match &state.config.store {
            NoteStoreConfig::Memory => "memory".to_string(),
            NoteStoreConfig::Local { path } => format!("local ({})", path.display()),
            NoteStoreConfig::S3 {
                endpoint, bucket, ..
            } => format!("s3 ({}/{})", endpoint, bucket),
        };
        let expiry = match state.config.token_max_age_secs {
            Some(secs) => format!("{}s", secs),
            None => "never".to_string(),
        };

        let output = format!(
            "Initialized jotter directory at: {}\n\
             - Config: {}\n\
             - Store: {}\n\
             - API port: {}\n\
             - Token expiry: {}\n\
             Set {} before starting the daemon (see `jotter hash-password`)",
            state.jotter_dir.display(),
            state.config_path.display(),
            store,
            state.config.api_port,
            expiry,
            common::auth::REFERENCE_SECRET_ENV,
        );

        Ok(output)
    }
}
