//! Object storage backend for the note collection
//!
//! The whole collection is one JSON array stored under a single fixed key.
//! Reads return it wholesale; writes replace it wholesale. There is no
//! versioning or locking, so when two devices save at once the last write wins.
//!
//! # Backends
//!
//! - In-memory (tests, throwaway daemons)
//! - Local filesystem
//! - S3-compatible storage (AWS S3, MinIO, R2, ...)
//!
//! # Example
//!
//! ```rust,no_run
//! use jotter_object_store::{NoteStore, NoteStoreConfig};
//!
//! # async fn example() -> Result<(), jotter_object_store::BlobStoreError> {
//! let store = NoteStore::new(NoteStoreConfig::Memory).await?;
//! store.save_notes(&[serde_json::json!({"id": "n1"})]).await?;
//! assert_eq!(store.load_notes().await?.len(), 1);
//! # Ok(())
//! # }
//! ```

mod error;
mod storage;

pub use error::{BlobStoreError, Result};
pub use storage::{NoteStore, NoteStoreConfig, NOTES_KEY};
