//! Storage trait definition.

use garb_core::ImageId;
use garb_error::GarbResult;

/// A blob retrieved from an image store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Raw image bytes
    pub data: Vec<u8>,
    /// MIME type recorded at store time
    pub mime_type: String,
}

/// A presigned direct-upload grant.
///
/// Clients PUT the image bytes to `url`; the blob then becomes addressable
/// under `image_id` without passing through the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    /// Reference the uploaded blob will be stored under
    pub image_id: ImageId,
    /// Where the client uploads the bytes
    pub url: String,
}

/// Trait for pluggable image blob storage backends.
///
/// References are opaque [`ImageId`]s minted by the backend; metadata (owner,
/// names, categories) lives in the record stores, not here.
#[async_trait::async_trait]
pub trait ImageStore: Send + Sync {
    /// Store image bytes and return a fresh reference.
    async fn store(&self, data: &[u8], mime_type: &str) -> GarbResult<ImageId>;

    /// Retrieve a blob by reference.
    ///
    /// Returns `None` when the reference does not exist (or was deleted).
    async fn get(&self, id: &ImageId) -> GarbResult<Option<StoredImage>>;

    /// Delete a blob by reference. Deleting an absent reference is a no-op.
    async fn delete(&self, id: &ImageId) -> GarbResult<()>;

    /// Get a URL a client can fetch the blob from, if the backend can serve
    /// one. Returns `None` for absent references or backends without URLs.
    async fn get_url(&self, id: &ImageId) -> GarbResult<Option<String>>;

    /// Issue a presigned direct-upload grant, if the backend supports
    /// client-side uploads. Backends without them return `None`.
    async fn upload_url(&self) -> GarbResult<Option<UploadTicket>>;
}
