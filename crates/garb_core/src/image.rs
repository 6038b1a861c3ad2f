//! Binary image payloads and labeled references.

use serde::{Deserialize, Serialize};

/// Label preceding the top clothing item reference image.
pub const LABEL_TOP_ITEM: &str = "TOP CLOTHING ITEM:";
/// Label preceding the bottom clothing item reference image.
pub const LABEL_BOTTOM_ITEM: &str = "BOTTOM CLOTHING ITEM:";
/// Label preceding the body image.
pub const LABEL_PERSON: &str = "PERSON TO DRESS:";
/// Label preceding the inspiration outfit image.
pub const LABEL_INSPIRATION: &str = "INSPIRATION OUTFIT:";

/// Raw image bytes plus their MIME type.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    /// Raw image bytes
    pub data: Vec<u8>,
    /// MIME type, e.g. "image/png" or "image/jpeg"
    pub mime_type: String,
}

impl ImageData {
    /// Create an image payload.
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }
}

impl std::fmt::Debug for ImageData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageData")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// A reference image with the label text the provider sees immediately
/// before it.
///
/// Order matters: image models are sensitive to the position of each
/// reference, so assembled lists must be passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledImage {
    /// Label interleaved into the request just before the image
    pub label: String,
    /// The image payload
    pub image: ImageData,
}

impl LabeledImage {
    /// Attach a label to an image payload.
    pub fn new(label: impl Into<String>, image: ImageData) -> Self {
        Self {
            label: label.into(),
            image,
        }
    }
}
