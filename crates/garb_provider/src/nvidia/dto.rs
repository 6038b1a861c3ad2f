//! Chat completions wire format.
//!
//! The request side follows the OpenAI multimodal content convention:
//! a message `content` is either a plain string or an ordered list of
//! text and `image_url` parts. The response side is deliberately loose,
//! with every field optional, since the image can arrive either as a
//! structured `images` attachment or inline in the assistant text.

use serde::{Deserialize, Serialize};

/// A chat completions request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,
    /// Conversation, a single user message for image generation
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f64,
    /// Response token budget
    pub max_tokens: u32,
}

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    /// Message role, always "user" for generation requests
    pub role: String,
    /// Message body
    pub content: MessageContent,
}

impl ChatMessage {
    /// A user message.
    pub fn user(content: MessageContent) -> Self {
        Self {
            role: "user".to_string(),
            content,
        }
    }
}

/// Message body: a bare string or interleaved multimodal parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text, used when the request carries no reference images
    Text(String),
    /// Ordered text and image parts
    Parts(Vec<ContentPart>),
}

/// One part of a multimodal message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// A text fragment
    Text {
        /// The fragment
        text: String,
    },
    /// An image, embedded as a data URI
    ImageUrl {
        /// The image reference
        image_url: ImageUrl,
    },
}

impl ContentPart {
    /// A text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// An image part wrapping a data URI.
    pub fn image(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }
}

/// An image URL wrapper, matching the OpenAI `image_url` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// The URL, a data URI in both directions
    pub url: String,
}

/// A chat completions response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletion {
    /// Completion choices, the first of which carries the result
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One completion choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    /// The assistant message
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

/// The assistant message of a completion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMessage {
    /// Assistant text, which may embed a data URI
    #[serde(default)]
    pub content: Option<String>,
    /// Structured image attachments
    #[serde(default)]
    pub images: Option<Vec<ResponseImage>>,
}

/// One structured image attachment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseImage {
    /// The attachment payload
    #[serde(default)]
    pub image_url: Option<ImageUrl>,
}
