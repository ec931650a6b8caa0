use std::path::PathBuf;
use std::time::Duration;

use common::prelude::ReferenceSecret;
use object_store::NoteStoreConfig;

use crate::classifier::ClassifierConfig;

#[derive(Debug, Clone)]
pub struct Config {
    // auth configuration
    /// reference password hash, if not set then every login
    ///  answers with a configuration error
    pub reference_secret: Option<ReferenceSecret>,
    /// maximum token age, if not set then tokens never expire
    pub token_max_age: Option<Duration>,

    // note store configuration
    /// Note storage backend configuration
    pub store: NoteStoreConfig,

    // classifier configuration
    /// Model endpoint for `/analyze`, if not set the route answers 503
    pub classifier: Option<ClassifierConfig>,

    // http server configuration
    /// Port for the API HTTP server
    pub api_port: u16,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_secret: None,
            token_max_age: None,
            store: NoteStoreConfig::Memory,
            classifier: None,
            api_port: 5001,
            log_level: tracing::Level::INFO,
            log_dir: None,
        }
    }
}
