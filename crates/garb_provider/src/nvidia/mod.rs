//! NVIDIA inference API backend.

mod client;
mod dto;
mod parse;

pub use client::{NvidiaClient, NVIDIA_API_URL, NVIDIA_MODEL};
pub use dto::{
    ChatCompletion, ChatMessage, ChatRequest, Choice, ContentPart, ImageUrl, MessageContent,
    ResponseImage, ResponseMessage,
};
pub use parse::parse_image_response;
