//! The provider seam between orchestration and inference.

use crate::nvidia::{NvidiaClient, NVIDIA_API_URL, NVIDIA_MODEL};
use garb_core::{ImageData, LabeledImage};
use std::sync::Arc;

/// Everything a provider needs to run one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationInput {
    /// The instruction text, sent after all reference images
    pub prompt: String,
    /// Reference images in presentation order, each preceded by its label
    pub labeled_images: Vec<LabeledImage>,
}

impl GenerationInput {
    /// Build an input from a prompt and ordered reference images.
    pub fn new(prompt: impl Into<String>, labeled_images: Vec<LabeledImage>) -> Self {
        Self {
            prompt: prompt.into(),
            labeled_images,
        }
    }
}

/// Outcome of one provider call.
///
/// A `Failure` is an expected business outcome recorded on the generation
/// record, not a transport-layer error to propagate.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutput {
    /// The provider produced an image.
    Success {
        /// The generated image
        image: ImageData,
        /// Model identifier that produced it
        model: String,
    },
    /// The provider could not produce an image.
    Failure {
        /// Human-readable reason, stored on the generation record
        error: String,
    },
}

impl GenerationOutput {
    /// Whether this outcome carries an image.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// An image generation backend.
///
/// Implementations must be cheap to share behind an [`Arc`] and safe to call
/// concurrently from multiple workers.
#[async_trait::async_trait]
pub trait ImageProvider: Send + Sync {
    /// Stable identifier recorded on generations handled by this provider.
    fn id(&self) -> &'static str;

    /// Model identifier sent upstream.
    fn model_name(&self) -> &str;

    /// Run one generation.
    ///
    /// Never returns `Err`: every upstream problem, from a missing API key
    /// to a malformed response, is folded into
    /// [`GenerationOutput::Failure`].
    async fn generate(&self, input: &GenerationInput) -> GenerationOutput;
}

/// Provider connection settings.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Bearer token for the inference API, absent when unconfigured
    pub api_key: Option<String>,
    /// Model identifier to request
    pub model: String,
    /// API origin, without the `/chat/completions` suffix
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: NVIDIA_MODEL.to_string(),
            base_url: NVIDIA_API_URL.to_string(),
        }
    }
}

/// Construct the provider described by the configuration.
///
/// Only the NVIDIA chat completions backend is bundled today; the
/// indirection keeps call sites working against [`ImageProvider`] so new
/// backends slot in without touching the orchestrator.
pub fn select_provider(config: &ProviderConfig) -> Arc<dyn ImageProvider> {
    Arc::new(NvidiaClient::new(config))
}
