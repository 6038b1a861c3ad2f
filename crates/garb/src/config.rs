//! Application configuration.

use config::{Config, Environment, File};
use garb_core::ImageId;
use garb_error::{ConfigError, GarbResult};
use garb_provider::{ProviderConfig, NVIDIA_API_URL, NVIDIA_MODEL};
use garb_quota::DEFAULT_DAILY_LIMIT;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, instrument};

fn default_model() -> String {
    NVIDIA_MODEL.to_string()
}

fn default_base_url() -> String {
    NVIDIA_API_URL.to_string()
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("media")
}

fn default_daily_limit() -> u32 {
    DEFAULT_DAILY_LIMIT
}

fn default_workers() -> usize {
    2
}

/// Service configuration, loaded once at startup.
///
/// Sources, later ones overriding earlier: field defaults, an optional
/// `garb.toml` in the working directory, `GARB_*` environment variables, and
/// finally the bare `NVIDIA_API_KEY` (or `NVAPIKEY`) and
/// `BODY_IMAGE_STORAGE_ID` variables the original deployment used.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Bearer token for the inference API
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model identifier to request
    #[serde(default = "default_model")]
    pub model: String,
    /// Inference API origin
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Blob reference of the default body image, used when a generation
    /// carries no override
    #[serde(default)]
    pub default_body_image: Option<ImageId>,
    /// Root directory of the filesystem image store
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,
    /// Generations each user may start per UTC day
    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,
    /// Concurrent generation executions
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            default_body_image: None,
            media_dir: default_media_dir(),
            daily_limit: default_daily_limit(),
            workers: default_workers(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `garb.toml` and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source fails to parse or a value does not fit
    /// its field, including a malformed `BODY_IMAGE_STORAGE_ID`.
    #[instrument]
    pub fn load() -> GarbResult<Self> {
        debug!("Loading configuration: defaults < garb.toml < GARB_* env < legacy env");

        let mut loaded: Self = Config::builder()
            .add_source(File::with_name("garb").required(false))
            .add_source(Environment::with_prefix("GARB").try_parsing(true))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {e}")))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {e}")))?;

        if loaded.api_key.is_none() {
            loaded.api_key = legacy_api_key(|name| std::env::var(name).ok());
        }
        if loaded.default_body_image.is_none() {
            if let Ok(raw) = std::env::var("BODY_IMAGE_STORAGE_ID") {
                let id = raw.parse().map_err(|e| {
                    ConfigError::new(format!("Invalid BODY_IMAGE_STORAGE_ID {raw:?}: {e}"))
                })?;
                loaded.default_body_image = Some(id);
            }
        }

        Ok(loaded)
    }

    /// Provider connection settings derived from this configuration.
    pub fn provider(&self) -> ProviderConfig {
        ProviderConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

/// The original deployment read the key from `NVIDIA_API_KEY`, falling back
/// to `NVAPIKEY`.
fn legacy_api_key(var: impl Fn(&str) -> Option<String>) -> Option<String> {
    var("NVIDIA_API_KEY").or_else(|| var("NVAPIKEY"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_deployment() {
        let config = AppConfig::default();
        assert_eq!(config.model, NVIDIA_MODEL);
        assert_eq!(config.base_url, NVIDIA_API_URL);
        assert_eq!(config.daily_limit, 10);
        assert_eq!(config.workers, 2);
        assert!(config.api_key.is_none());
        assert!(config.default_body_image.is_none());
    }

    #[test]
    fn legacy_key_lookup_prefers_nvidia_api_key() {
        let both = |name: &str| match name {
            "NVIDIA_API_KEY" => Some("nvapi-primary".to_string()),
            "NVAPIKEY" => Some("nvapi-legacy".to_string()),
            _ => None,
        };
        assert_eq!(legacy_api_key(both).as_deref(), Some("nvapi-primary"));

        let legacy_only = |name: &str| {
            (name == "NVAPIKEY").then(|| "nvapi-legacy".to_string())
        };
        assert_eq!(legacy_api_key(legacy_only).as_deref(), Some("nvapi-legacy"));

        assert!(legacy_api_key(|_| None).is_none());
    }

    #[test]
    fn provider_settings_carry_the_key() {
        let config = AppConfig {
            api_key: Some("nvapi-test".to_string()),
            ..AppConfig::default()
        };
        let provider = config.provider();
        assert_eq!(provider.api_key.as_deref(), Some("nvapi-test"));
        assert_eq!(provider.model, NVIDIA_MODEL);
    }
}
