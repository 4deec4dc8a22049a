use crate::traits::{MediaStore, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem store implementation
#[derive(Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalMediaStore {
    /// Create a new LocalMediaStore instance
    ///
    /// # Arguments
    /// * `root` - Root directory for variant storage (e.g., "/var/lib/vitrine/uploads")
    /// * `public_prefix` - Prefix of the relative paths handed to callers (e.g., "/uploads")
    pub async fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> StorageResult<Self> {
        let root = root.into();

        fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage root {}: {}",
                root.display(),
                e
            ))
        })?;

        let public_prefix: String = public_prefix.into();
        let public_prefix = public_prefix.trim_end_matches('/').to_string();
        if public_prefix.is_empty() {
            return Err(StorageError::ConfigError(
                "Public prefix must not be empty".to_string(),
            ));
        }

        Ok(LocalMediaStore {
            root,
            public_prefix,
        })
    }

    /// Validate one path segment (a namespace or a filename).
    ///
    /// Segments come from callers, not end users, but the check still rejects
    /// anything that could change the directory the path resolves to.
    fn check_segment(kind: &str, segment: &str) -> StorageResult<()> {
        if segment.is_empty()
            || segment.contains("..")
            || segment.contains('/')
            || segment.contains('\\')
        {
            return Err(StorageError::InvalidPath(format!(
                "{} contains invalid characters: {:?}",
                kind, segment
            )));
        }
        Ok(())
    }

    /// Map a public relative path back to a filesystem location.
    ///
    /// Only `<public_prefix>/<namespace>/<filename>` with clean segments is
    /// accepted; everything else is `InvalidPath`, so a crafted path can
    /// never resolve outside the storage root.
    fn resolve(&self, relative_path: &str) -> StorageResult<PathBuf> {
        let rest = relative_path
            .strip_prefix(&self.public_prefix)
            .and_then(|r| r.strip_prefix('/'))
            .ok_or_else(|| {
                StorageError::InvalidPath(format!(
                    "Path is outside the public prefix: {}",
                    relative_path
                ))
            })?;

        let mut parts = rest.split('/');
        let (namespace, filename) = match (parts.next(), parts.next(), parts.next()) {
            (Some(namespace), Some(filename), None) => (namespace, filename),
            _ => {
                return Err(StorageError::InvalidPath(format!(
                    "Malformed storage path: {}",
                    relative_path
                )))
            }
        };

        Self::check_segment("namespace", namespace)?;
        Self::check_segment("filename", filename)?;

        Ok(self.root.join(namespace).join(filename))
    }

    fn public_path(&self, namespace: &str, filename: &str) -> String {
        format!("{}/{}/{}", self.public_prefix, namespace, filename)
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn put(&self, namespace: &str, filename: &str, data: Vec<u8>) -> StorageResult<String> {
        Self::check_segment("namespace", namespace)?;
        Self::check_segment("filename", filename)?;

        let dir = self.root.join(namespace);
        // create_dir_all is a no-op when the directory already exists, so
        // concurrent uploads to the same namespace cannot race each other.
        fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to create namespace directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let path = dir.join(filename);
        let size = data.len();
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let public = self.public_path(namespace, filename);

        tracing::info!(
            path = %path.display(),
            public = %public,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local store write successful"
        );

        Ok(public)
    }

    async fn remove(&self, relative_path: &str) -> StorageResult<bool> {
        let path = self.resolve(relative_path)?;
        let start = std::time::Instant::now();

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(
                    path = %path.display(),
                    public = %relative_path,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Local store delete successful"
                );
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn exists(&self, relative_path: &str) -> StorageResult<bool> {
        let path = self.resolve(relative_path)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }
}
