//! Extracting the generated image from a completion.

use crate::data_uri::parse_data_uri;
use crate::nvidia::ChatCompletion;
use garb_core::ImageData;

/// Pull the generated image out of a chat completion.
///
/// The structured `images` attachment is checked first; when it is absent
/// or does not hold a data URI, the assistant text is scanned for an
/// embedded one. Returns `None` when neither location yields an image.
pub fn parse_image_response(completion: &ChatCompletion) -> Option<ImageData> {
    let message = completion.choices.first()?.message.as_ref()?;

    if let Some(images) = &message.images {
        if let Some(url) = images
            .first()
            .and_then(|image| image.image_url.as_ref())
            .map(|image_url| image_url.url.as_str())
        {
            if url.starts_with("data:image") {
                if let Some(image) = parse_data_uri(url) {
                    return Some(image);
                }
            }
        }
    }

    message
        .content
        .as_deref()
        .and_then(parse_data_uri)
}
