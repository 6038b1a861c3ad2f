//! Filesystem-based image storage implementation.
//!
//! Blobs are stored under a two-level sharded directory keyed by their
//! reference id, with a JSON sidecar carrying the MIME type and a SHA-256
//! content hash that is verified on every read.

use crate::{ImageStore, StoredImage, UploadTicket};
use garb_core::ImageId;
use garb_error::{GarbResult, StorageError, StorageErrorKind};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Filesystem storage backend.
///
/// Layout: `{base}/{id[0..2]}/{id}` for the bytes and
/// `{base}/{id[0..2]}/{id}.meta` for the sidecar.
///
/// Writes go to a temp file first and are renamed into place, so readers
/// never observe a partial blob.
pub struct FileSystemStore {
    base_path: PathBuf,
}

/// Sidecar metadata persisted next to each blob.
#[derive(Debug, Serialize, Deserialize)]
struct BlobMeta {
    mime_type: String,
    content_hash: String,
    size_bytes: u64,
}

impl FileSystemStore {
    /// Create a new filesystem store, creating the base directory if needed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> GarbResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem image store");
        Ok(Self { base_path })
    }

    /// Compute SHA-256 hash of data.
    fn compute_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    /// Path of the blob for a reference: `{base}/{id[0..2]}/{id}`.
    fn blob_path(&self, id: &ImageId) -> PathBuf {
        let name = id.as_uuid().simple().to_string();
        self.base_path.join(&name[0..2]).join(name)
    }

    fn meta_path(&self, id: &ImageId) -> PathBuf {
        let mut path = self.blob_path(id).into_os_string();
        path.push(".meta");
        PathBuf::from(path)
    }

    async fn write_atomic(path: &Path, data: &[u8]) -> GarbResult<()> {
        let mut temp_path = path.as_os_str().to_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;
        Ok(())
    }

    async fn read_meta(&self, id: &ImageId) -> GarbResult<Option<BlobMeta>> {
        let meta_path = self.meta_path(id);
        let raw = match tokio::fs::read(&meta_path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    meta_path.display(),
                    e
                ))))?;
            }
        };

        let meta: BlobMeta = serde_json::from_slice(&raw).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupted(format!(
                "sidecar {}: {}",
                meta_path.display(),
                e
            )))
        })?;
        Ok(Some(meta))
    }
}

#[async_trait::async_trait]
impl ImageStore for FileSystemStore {
    #[tracing::instrument(skip(self, data), fields(size = data.len(), mime_type = %mime_type))]
    async fn store(&self, data: &[u8], mime_type: &str) -> GarbResult<ImageId> {
        let id = ImageId::new();
        let path = self.blob_path(&id);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let meta = BlobMeta {
            mime_type: mime_type.to_string(),
            content_hash: Self::compute_hash(data),
            size_bytes: data.len() as u64,
        };
        let meta_bytes = serde_json::to_vec(&meta).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!("sidecar encode: {}", e)))
        })?;

        Self::write_atomic(&path, data).await?;
        Self::write_atomic(&self.meta_path(&id), &meta_bytes).await?;

        tracing::info!(
            id = %id,
            path = %path.display(),
            size = data.len(),
            "Stored image blob"
        );
        Ok(id)
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: &ImageId) -> GarbResult<Option<StoredImage>> {
        let Some(meta) = self.read_meta(id).await? else {
            return Ok(None);
        };

        let path = self.blob_path(id);
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                ))))?;
            }
        };

        let actual_hash = Self::compute_hash(&data);
        if actual_hash != meta.content_hash {
            return Err(StorageError::new(StorageErrorKind::Corrupted(format!(
                "{}: expected hash {}, got {}",
                path.display(),
                meta.content_hash,
                actual_hash
            ))))?;
        }

        tracing::debug!(id = %id, size = data.len(), "Retrieved image blob");
        Ok(Some(StoredImage {
            data,
            mime_type: meta.mime_type,
        }))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &ImageId) -> GarbResult<()> {
        for path in [self.blob_path(id), self.meta_path(id)] {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                        "delete {}: {}",
                        path.display(),
                        e
                    ))))?;
                }
            }
        }
        tracing::info!(id = %id, "Deleted image blob");
        Ok(())
    }

    async fn get_url(&self, id: &ImageId) -> GarbResult<Option<String>> {
        let path = self.blob_path(id);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            Ok(Some(format!("file://{}", path.display())))
        } else {
            Ok(None)
        }
    }

    async fn upload_url(&self) -> GarbResult<Option<UploadTicket>> {
        // Presigned uploads belong to managed blob services; local files
        // go through `store` instead.
        Ok(None)
    }
}
