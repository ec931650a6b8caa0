//! Object storage backend abstraction (S3/MinIO/local filesystem/memory).

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BlobStoreError, Result};

/// The one key the note collection lives under.
pub const NOTES_KEY: &str = "global_notes";

/// Configuration for the object storage backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NoteStoreConfig {
    /// In-memory storage (lost on restart)
    #[default]
    Memory,

    /// Local filesystem storage
    Local {
        /// Path to the storage directory
        path: PathBuf,
    },

    /// S3-compatible storage (AWS S3, MinIO, etc.)
    S3 {
        /// S3 endpoint URL (e.g., "http://localhost:9000" for MinIO)
        endpoint: String,
        /// Access key ID
        access_key: String,
        /// Secret access key
        secret_key: String,
        /// Bucket name
        bucket: String,
        /// Optional region (defaults to "us-east-1")
        region: Option<String>,
    },
}

/// Whole-collection note storage on top of any object store.
#[derive(Debug, Clone)]
pub struct NoteStore {
    inner: Arc<dyn ObjectStore>,
}

impl NoteStore {
    /// Create a new storage backend from configuration.
    pub async fn new(config: NoteStoreConfig) -> Result<Self> {
        let inner: Arc<dyn ObjectStore> = match &config {
            NoteStoreConfig::Memory => Arc::new(InMemory::new()),

            NoteStoreConfig::Local { path } => {
                // Ensure directory exists
                tokio::fs::create_dir_all(path).await?;
                Arc::new(
                    LocalFileSystem::new_with_prefix(path)
                        .map_err(|e| BlobStoreError::InvalidConfig(e.to_string()))?,
                )
            }

            NoteStoreConfig::S3 {
                endpoint,
                access_key,
                secret_key,
                bucket,
                region,
            } => {
                let builder = AmazonS3Builder::new()
                    .with_endpoint(endpoint)
                    .with_access_key_id(access_key)
                    .with_secret_access_key(secret_key)
                    .with_bucket_name(bucket)
                    .with_region(region.as_deref().unwrap_or("us-east-1"))
                    .with_allow_http(endpoint.starts_with("http://"));

                let store: Arc<dyn ObjectStore> = Arc::new(
                    builder
                        .build()
                        .map_err(|e| BlobStoreError::InvalidConfig(e.to_string()))?,
                );

                // Fail fast if the bucket doesn't exist
                {
                    use futures::TryStreamExt;
                    let prefix = ObjectPath::from("");
                    let mut stream = store.list(Some(&prefix));
                    match stream.try_next().await {
                        Ok(_) => {}
                        Err(object_store::Error::NotFound { .. }) => {
                            return Err(BlobStoreError::BucketNotFound(bucket.clone()));
                        }
                        Err(e) => {
                            let msg = e.to_string();
                            if msg.contains("NoSuchBucket") {
                                return Err(BlobStoreError::BucketNotFound(bucket.clone()));
                            }
                            return Err(e.into());
                        }
                    }
                }

                store
            }
        };

        tracing::info!(backend = %inner, "note store ready");
        Ok(Self { inner })
    }

    /// An in-memory store, for tests and ephemeral daemons.
    pub fn memory() -> Self {
        Self {
            inner: Arc::new(InMemory::new()),
        }
    }

    fn notes_path() -> ObjectPath {
        ObjectPath::from(NOTES_KEY)
    }

    /// Raw stored bytes, or `None` if nothing has been saved yet.
    pub async fn load(&self) -> Result<Option<Bytes>> {
        match self.inner.get(&Self::notes_path()).await {
            Ok(result) => {
                let bytes = result.bytes().await?;
                Ok(Some(bytes))
            }
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// The stored collection; empty if nothing has been saved yet.
    pub async fn load_notes(&self) -> Result<Vec<Value>> {
        match self.load().await? {
            Some(bytes) => serde_json::from_slice(&bytes).map_err(BlobStoreError::Corrupt),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the stored collection with `notes`.
    pub async fn save_notes(&self, notes: &[Value]) -> Result<()> {
        let data = serde_json::to_vec(notes).map_err(BlobStoreError::Serialize)?;
        let size = data.len();
        self.inner
            .put(&Self::notes_path(), Bytes::from(data).into())
            .await?;
        tracing::debug!(count = notes.len(), size, "notes saved");
        Ok(())
    }

    /// Probe the backend. A missing notes object still counts as ready.
    pub async fn is_ready(&self) -> Result<()> {
        match self.inner.head(&Self::notes_path()).await {
            Ok(_) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
