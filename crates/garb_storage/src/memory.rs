//! In-memory image storage implementation.

use crate::{ImageStore, StoredImage, UploadTicket};
use garb_core::ImageId;
use garb_error::GarbResult;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory storage backend.
///
/// Holds blobs in a map for the life of the process. Used by tests and by
/// deployments that keep generated images ephemeral.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<ImageId, StoredImage>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs currently held.
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    /// Whether the store holds no blobs.
    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ImageStore for MemoryStore {
    async fn store(&self, data: &[u8], mime_type: &str) -> GarbResult<ImageId> {
        let id = ImageId::new();
        self.blobs.write().await.insert(
            id,
            StoredImage {
                data: data.to_vec(),
                mime_type: mime_type.to_string(),
            },
        );
        tracing::debug!(id = %id, size = data.len(), "Stored image blob in memory");
        Ok(id)
    }

    async fn get(&self, id: &ImageId) -> GarbResult<Option<StoredImage>> {
        Ok(self.blobs.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &ImageId) -> GarbResult<()> {
        self.blobs.write().await.remove(id);
        Ok(())
    }

    async fn get_url(&self, id: &ImageId) -> GarbResult<Option<String>> {
        Ok(self
            .blobs
            .read()
            .await
            .contains_key(id)
            .then(|| format!("memory://{id}")))
    }

    async fn upload_url(&self) -> GarbResult<Option<UploadTicket>> {
        Ok(None)
    }
}
