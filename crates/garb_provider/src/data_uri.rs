//! Base64 image data URIs.

use crate::base64;
use garb_core::ImageData;
use regex::Regex;
use std::sync::LazyLock;

static DATA_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"data:image/(\w+);base64,([A-Za-z0-9+/=]+)").expect("Valid data URI regex")
});

/// Embed image bytes as a `data:{mime};base64,...` URI.
///
/// # Examples
///
/// ```
/// let uri = garb_provider::to_data_uri(&[0xff, 0xd8], "image/jpeg");
/// assert_eq!(uri, "data:image/jpeg;base64,/9g=");
/// ```
pub fn to_data_uri(data: &[u8], mime_type: &str) -> String {
    format!("data:{mime_type};base64,{}", base64::encode(data))
}

/// Extract the first image data URI from a block of text and decode it.
///
/// Accepts both a bare URI and a URI embedded in surrounding prose, which is
/// how some models return generated images inside the assistant message.
/// Returns `None` when no URI is present or the payload fails to decode.
pub fn parse_data_uri(text: &str) -> Option<ImageData> {
    let captures = DATA_URI.captures(text)?;
    let format = captures.get(1)?.as_str();
    let payload = captures.get(2)?.as_str();
    let data = base64::decode(payload)?;
    Some(ImageData::new(data, format!("image/{format}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_bare_uri() {
        let image = parse_data_uri("data:image/png;base64,Zm9v").unwrap();
        assert_eq!(image.data, b"foo");
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn finds_a_uri_inside_prose() {
        let text = "Here is your outfit: data:image/jpeg;base64,Zm9vYg== enjoy!";
        let image = parse_data_uri(text).unwrap();
        assert_eq!(image.data, b"foob");
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[test]
    fn rejects_text_without_a_uri() {
        assert!(parse_data_uri("no image here").is_none());
        assert!(parse_data_uri("data:text/plain;base64,Zm9v").is_none());
    }

    #[test]
    fn round_trips_through_encoding() {
        let uri = to_data_uri(b"\x89PNG\r\n", "image/png");
        let image = parse_data_uri(&uri).unwrap();
        assert_eq!(image.data, b"\x89PNG\r\n");
        assert_eq!(image.mime_type, "image/png");
    }
}
