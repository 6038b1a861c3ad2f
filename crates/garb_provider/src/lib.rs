#![forbid(unsafe_code)]
#![warn(missing_docs)]
//! Image generation provider adapters.
//!
//! The [`ImageProvider`] trait is the seam between the orchestrator and the
//! upstream inference API. The bundled [`NvidiaClient`] speaks an
//! OpenAI-style chat completions dialect: reference images travel in the
//! request as base64 data URIs, and the generated image comes back either as
//! a structured attachment or embedded in the assistant text.
//!
//! Provider failures are data, not errors: [`ImageProvider::generate`]
//! returns [`GenerationOutput::Failure`] with a human-readable message that
//! the orchestrator records on the generation.

mod base64;
mod data_uri;
mod nvidia;
mod provider;

pub use base64::{decode as base64_decode, encode as base64_encode};
pub use data_uri::{parse_data_uri, to_data_uri};
pub use nvidia::{
    ChatCompletion, ChatMessage, ChatRequest, Choice, ContentPart, ImageUrl, MessageContent,
    NvidiaClient, ResponseImage, ResponseMessage, NVIDIA_API_URL, NVIDIA_MODEL,
};
pub use provider::{
    select_provider, GenerationInput, GenerationOutput, ImageProvider, ProviderConfig,
};
