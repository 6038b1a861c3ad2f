//! NVIDIA chat completions client.

use crate::data_uri::to_data_uri;
use crate::nvidia::{
    parse_image_response, ChatCompletion, ChatMessage, ChatRequest, ContentPart, MessageContent,
};
use crate::{GenerationInput, GenerationOutput, ImageProvider, ProviderConfig};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

/// Default model requested from the inference API.
pub const NVIDIA_MODEL: &str = "gcp/google/gemini-3-pro-image-preview";
/// Default API origin.
pub const NVIDIA_API_URL: &str = "https://inference-api.nvidia.com";

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 4096;

/// Client for the NVIDIA inference API.
///
/// Constructed without validating the API key: a missing key surfaces as a
/// [`GenerationOutput::Failure`] on the first call instead, so the service
/// starts and reports quota and wardrobe state even when unconfigured.
#[derive(Debug, Clone)]
pub struct NvidiaClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl NvidiaClient {
    /// Create a client from provider settings.
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request(&self, input: &GenerationInput) -> ChatRequest {
        let content = if input.labeled_images.is_empty() {
            MessageContent::Text(input.prompt.clone())
        } else {
            let mut parts = Vec::with_capacity(input.labeled_images.len() * 2 + 1);
            for labeled in &input.labeled_images {
                parts.push(ContentPart::text(&labeled.label));
                parts.push(ContentPart::image(to_data_uri(
                    &labeled.image.data,
                    &labeled.image.mime_type,
                )));
            }
            parts.push(ContentPart::text(&input.prompt));
            MessageContent::Parts(parts)
        };

        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(content)],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

fn failure(error: impl Into<String>) -> GenerationOutput {
    GenerationOutput::Failure {
        error: error.into(),
    }
}

#[async_trait]
impl ImageProvider for NvidiaClient {
    fn id(&self) -> &'static str {
        "nvidia"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, input), fields(images = input.labeled_images.len()))]
    async fn generate(&self, input: &GenerationInput) -> GenerationOutput {
        let Some(api_key) = &self.api_key else {
            return failure(
                "NVIDIA_API_KEY environment variable not set. \
                 Get one from https://inference.nvidia.com/key-management",
            );
        };

        let request = self.build_request(input);
        let url = self.endpoint();
        debug!(url = %url, model = %self.model, "Sending NVIDIA API request");

        let response = match self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return failure(format!("NVIDIA API error: {e}")),
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "NVIDIA API request rejected");
            return failure(format!("NVIDIA API error: {status}: {body}"));
        }

        let completion: ChatCompletion = match response.json().await {
            Ok(completion) => completion,
            Err(e) => return failure(format!("NVIDIA API error: {e}")),
        };

        match parse_image_response(&completion) {
            Some(image) => GenerationOutput::Success {
                image,
                model: self.model.clone(),
            },
            None => failure("No image data found in response from NVIDIA API"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garb_core::{ImageData, LabeledImage, LABEL_PERSON, LABEL_TOP_ITEM};

    fn client_with_key() -> NvidiaClient {
        NvidiaClient::new(&ProviderConfig {
            api_key: Some("nvapi-test".to_string()),
            ..ProviderConfig::default()
        })
    }

    #[test]
    fn text_only_requests_use_a_plain_string() {
        let client = client_with_key();
        let input = GenerationInput::new("draw an outfit", Vec::new());
        let request = client.build_request(&input);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "draw an outfit");
        assert_eq!(json["model"], NVIDIA_MODEL);
        assert_eq!(json["temperature"], 0.7);
        assert_eq!(json["max_tokens"], 4096);
    }

    #[test]
    fn labels_precede_their_images_and_the_prompt_comes_last() {
        let client = client_with_key();
        let input = GenerationInput::new(
            "combine these",
            vec![
                LabeledImage::new(LABEL_TOP_ITEM, ImageData::new(vec![1, 2], "image/png")),
                LabeledImage::new(LABEL_PERSON, ImageData::new(vec![3, 4], "image/jpeg")),
            ],
        );
        let request = client.build_request(&input);

        let json = serde_json::to_value(&request).unwrap();
        let parts = json["messages"][0]["content"].as_array().unwrap();
        assert_eq!(parts.len(), 5);
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[0]["text"], LABEL_TOP_ITEM);
        assert_eq!(parts[1]["type"], "image_url");
        assert!(parts[1]["image_url"]["url"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,"));
        assert_eq!(parts[2]["text"], LABEL_PERSON);
        assert_eq!(parts[3]["type"], "image_url");
        assert_eq!(parts[4]["text"], "combine these");
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_a_request() {
        let client = NvidiaClient::new(&ProviderConfig::default());
        let input = GenerationInput::new("anything", Vec::new());

        match client.generate(&input).await {
            GenerationOutput::Failure { error } => {
                assert!(error.contains("NVIDIA_API_KEY"));
            }
            GenerationOutput::Success { .. } => panic!("expected a failure"),
        }
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let client = NvidiaClient::new(&ProviderConfig {
            api_key: None,
            model: NVIDIA_MODEL.to_string(),
            base_url: "https://inference-api.nvidia.com/".to_string(),
        });
        assert_eq!(
            client.endpoint(),
            "https://inference-api.nvidia.com/chat/completions"
        );
    }
}
