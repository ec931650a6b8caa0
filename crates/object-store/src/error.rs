//! Error types for the note store.

/// Errors that can occur when working with the note store.
#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    /// Object storage error
    #[error("object storage error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value is not a JSON array
    #[error("stored notes are corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// Notes could not be serialized
    #[error("failed to serialize notes: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// S3 bucket not found - must be created before use
    #[error("S3 bucket '{0}' does not exist. Create it before starting the daemon.")]
    BucketNotFound(String),
}

/// Result type alias for note store operations.
pub type Result<T> = std::result::Result<T, BlobStoreError>;
