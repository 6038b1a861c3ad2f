//! Generation lifecycle states.

use crate::ImageId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a generation, with the terminal payload carried
/// inside the variant.
///
/// A completed generation always has a stored output image and a failed one
/// always has an error message; the variants make any other combination
/// unrepresentable. Both terminal variants record which provider handled the
/// request and when the request finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GenerationState {
    /// Admitted, waiting for a worker to pick the job up.
    Pending,
    /// The external provider call is in flight.
    Generating {
        /// Provider selected for this generation
        provider: String,
    },
    /// The provider returned an image and it was persisted.
    Completed {
        /// Provider that handled the request
        provider: String,
        /// Blob reference of the generated image
        storage_id: ImageId,
        /// Model identifier reported by the provider
        model: String,
        /// When the terminal transition happened
        completed_at: DateTime<Utc>,
    },
    /// The provider call failed or an execution step errored.
    Failed {
        /// Provider that handled the request
        provider: String,
        /// Description of the failure
        error_message: String,
        /// When the terminal transition happened
        completed_at: DateTime<Utc>,
    },
}

impl GenerationState {
    /// Flatten to the plain status discriminant.
    pub fn status(&self) -> GenerationStatus {
        match self {
            GenerationState::Pending => GenerationStatus::Pending,
            GenerationState::Generating { .. } => GenerationStatus::Generating,
            GenerationState::Completed { .. } => GenerationStatus::Completed,
            GenerationState::Failed { .. } => GenerationStatus::Failed,
        }
    }

    /// Whether the generation has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GenerationState::Completed { .. } | GenerationState::Failed { .. }
        )
    }

    /// Blob reference of the output image, if completed.
    pub fn storage_id(&self) -> Option<&ImageId> {
        match self {
            GenerationState::Completed { storage_id, .. } => Some(storage_id),
            _ => None,
        }
    }

    /// Failure description, if failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            GenerationState::Failed { error_message, .. } => Some(error_message),
            _ => None,
        }
    }

    /// Provider id, once recorded.
    pub fn provider(&self) -> Option<&str> {
        match self {
            GenerationState::Pending => None,
            GenerationState::Generating { provider }
            | GenerationState::Completed { provider, .. }
            | GenerationState::Failed { provider, .. } => Some(provider),
        }
    }
}

/// Plain status discriminant for queries, events, and display.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GenerationStatus {
    /// Admitted, not yet executing
    Pending,
    /// Provider call in flight
    Generating,
    /// Finished with a stored image
    Completed,
    /// Finished with an error message
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_are_terminal() {
        assert!(!GenerationState::Pending.is_terminal());
        assert!(
            !GenerationState::Generating {
                provider: "nvidia".to_string()
            }
            .is_terminal()
        );
        let failed = GenerationState::Failed {
            provider: "nvidia".to_string(),
            error_message: "boom".to_string(),
            completed_at: Utc::now(),
        };
        assert!(failed.is_terminal());
        assert_eq!(failed.error_message(), Some("boom"));
        assert_eq!(failed.storage_id(), None);
    }

    #[test]
    fn completed_state_exposes_storage_id() {
        let storage_id = ImageId::new();
        let state = GenerationState::Completed {
            provider: "nvidia".to_string(),
            storage_id,
            model: "test-model".to_string(),
            completed_at: Utc::now(),
        };
        assert_eq!(state.storage_id(), Some(&storage_id));
        assert_eq!(state.error_message(), None);
        assert_eq!(state.status(), GenerationStatus::Completed);
    }
}
