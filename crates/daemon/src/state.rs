use std::{fs, path::PathBuf};

use object_store::NoteStoreConfig;
use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierConfig;

pub const APP_NAME: &str = "jotter";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const NOTES_DIR_NAME: &str = "notes";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Port for the API server
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Reject tokens older than this many seconds; tokens never expire if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_max_age_secs: Option<u64>,
    /// Where the note collection is stored
    #[serde(default)]
    pub store: NoteStoreConfig,
    /// Model endpoint for `/analyze`; the route answers 503 if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<ClassifierConfig>,
}

fn default_api_port() -> u16 {
    5001
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            token_max_age_secs: None,
            store: NoteStoreConfig::default(),
            classifier: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the jotter directory (~/.jotter)
    pub jotter_dir: PathBuf,
    /// Path to the local notes directory
    pub notes_path: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the jotter directory path (custom or default ~/.jotter)
    pub fn jotter_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new jotter state directory.
    ///
    /// A `Local` store without an explicit path is placed under `notes/`.
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let jotter_dir = Self::jotter_dir(custom_path)?;

        if jotter_dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&jotter_dir)?;

        let notes_path = jotter_dir.join(NOTES_DIR_NAME);
        fs::create_dir_all(&notes_path)?;

        let mut config = config.unwrap_or_default();
        if let NoteStoreConfig::Local { path } = &mut config.store {
            if path.as_os_str().is_empty() {
                *path = notes_path.clone();
            }
        }

        let config_path = jotter_dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        Ok(Self {
            jotter_dir,
            notes_path,
            config_path,
            config,
        })
    }

    /// Load existing state from the jotter directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let jotter_dir = Self::jotter_dir(custom_path)?;

        if !jotter_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let notes_path = jotter_dir.join(NOTES_DIR_NAME);
        let config_path = jotter_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            jotter_dir,
            notes_path,
            config_path,
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("jotter directory not initialized. Run 'jotter init' first")]
    NotInitialized,

    #[error("jotter directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_load() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("jotter");

        let config = AppConfig {
            api_port: 7000,
            token_max_age_secs: Some(3600),
            store: NoteStoreConfig::Local {
                path: PathBuf::new(),
            },
            classifier: None,
        };
        let state = AppState::init(Some(dir.clone()), Some(config)).unwrap();
        assert!(state.config_path.exists());
        assert!(state.notes_path.is_dir());
        assert_eq!(
            state.config.store,
            NoteStoreConfig::Local {
                path: dir.join(NOTES_DIR_NAME)
            }
        );

        let loaded = AppState::load(Some(dir)).unwrap();
        assert_eq!(loaded.config, state.config);
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("jotter");
        AppState::init(Some(dir.clone()), None).unwrap();
        assert!(matches!(
            AppState::init(Some(dir), None),
            Err(StateError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_load_uninitialized() {
        let temp = tempfile::tempdir().unwrap();
        assert!(matches!(
            AppState::load(Some(temp.path().join("missing"))),
            Err(StateError::NotInitialized)
        ));
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_port, 5001);

        let config: AppConfig = toml::from_str(
            r#"
            api_port = 8080
            token_max_age_secs = 60

            [store]
            type = "local"
            path = "/var/lib/jotter"

            [classifier]
            base_url = "http://localhost:11434/v1"
            model = "qwen2.5"
            "#,
        )
        .unwrap();
        assert_eq!(config.token_max_age_secs, Some(60));
        assert_eq!(config.classifier.unwrap().model, "qwen2.5");
    }
}
