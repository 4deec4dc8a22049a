//! Storage abstraction trait
//!
//! This module defines the MediaStore trait the pipeline writes through, so
//! the variant writer and the reclaimer stay decoupled from the concrete
//! backend.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage seam for variant files.
///
/// A path returned by `put` is a capability: opaque to callers, valid as
/// input to `remove` and `exists`, and never parsed for business meaning.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Durably write `data` under `namespace/filename` and return the public
    /// relative path. The namespace directory is created on first use.
    async fn put(&self, namespace: &str, filename: &str, data: Vec<u8>) -> StorageResult<String>;

    /// Remove a previously returned path. `Ok(true)` when a file was
    /// deleted, `Ok(false)` when it was already absent.
    async fn remove(&self, relative_path: &str) -> StorageResult<bool>;

    /// Whether the path currently resolves to a stored file.
    async fn exists(&self, relative_path: &str) -> StorageResult<bool>;
}
