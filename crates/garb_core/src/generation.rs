//! The generation record and its state machine.

use crate::{ClothingItemId, GenerationId, GenerationMode, GenerationState, ImageId, UserId};
use chrono::{DateTime, Utc};
use garb_error::{DataError, DataErrorKind, GarbResult};
use serde::{Deserialize, Serialize};

/// One request/response cycle producing one composited outfit image.
///
/// The identity, owner, mode, prompt, and input references are fixed at
/// creation. Only the state advances, and only through [`Generation::begin`],
/// [`Generation::complete`], and [`Generation::fail`], which enforce the
/// `pending -> generating -> {completed|failed}` path. Terminal states are
/// write-once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    /// Unique id of this generation
    pub id: GenerationId,
    /// Owning user
    pub user_id: UserId,
    /// Generation mode, fixed at creation
    pub mode: GenerationMode,
    /// Instruction prompt, built once at creation
    pub prompt: String,
    /// Top clothing item reference (outfit mode)
    pub top_item_id: Option<ClothingItemId>,
    /// Bottom clothing item reference (outfit mode)
    pub bottom_item_id: Option<ClothingItemId>,
    /// Inspiration image blob reference (transfer mode)
    pub inspiration_image_id: Option<ImageId>,
    /// Per-generation body image override (all modes)
    pub model_image_id: Option<ImageId>,
    /// Lifecycle state
    pub state: GenerationState,
    /// When the record was inserted
    pub created_at: DateTime<Utc>,
}

impl Generation {
    /// Create a fresh pending generation.
    pub fn new(
        user_id: UserId,
        mode: GenerationMode,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: GenerationId::new(),
            user_id,
            mode,
            prompt: prompt.into(),
            top_item_id: None,
            bottom_item_id: None,
            inspiration_image_id: None,
            model_image_id: None,
            state: GenerationState::Pending,
            created_at: Utc::now(),
        }
    }

    /// Attach the clothing item references used by outfit mode.
    pub fn with_items(
        mut self,
        top_item_id: Option<ClothingItemId>,
        bottom_item_id: Option<ClothingItemId>,
    ) -> Self {
        self.top_item_id = top_item_id;
        self.bottom_item_id = bottom_item_id;
        self
    }

    /// Attach the inspiration image reference used by transfer mode.
    pub fn with_inspiration(mut self, inspiration_image_id: ImageId) -> Self {
        self.inspiration_image_id = Some(inspiration_image_id);
        self
    }

    /// Attach a per-generation body image override.
    pub fn with_model_image(mut self, model_image_id: Option<ImageId>) -> Self {
        self.model_image_id = model_image_id;
        self
    }

    /// Transition `pending -> generating`, recording the provider id.
    pub fn begin(&mut self, provider: impl Into<String>) -> GarbResult<()> {
        match &self.state {
            GenerationState::Pending => {
                self.state = GenerationState::Generating {
                    provider: provider.into(),
                };
                Ok(())
            }
            other => Err(self.transition_error("generating", other))?,
        }
    }

    /// Transition `generating -> completed` with the stored output.
    pub fn complete(
        &mut self,
        storage_id: ImageId,
        model: impl Into<String>,
        completed_at: DateTime<Utc>,
    ) -> GarbResult<()> {
        match &self.state {
            GenerationState::Generating { provider } => {
                self.state = GenerationState::Completed {
                    provider: provider.clone(),
                    storage_id,
                    model: model.into(),
                    completed_at,
                };
                Ok(())
            }
            other => Err(self.transition_error("completed", other))?,
        }
    }

    /// Transition `generating -> failed` with the failure description.
    pub fn fail(
        &mut self,
        error_message: impl Into<String>,
        completed_at: DateTime<Utc>,
    ) -> GarbResult<()> {
        match &self.state {
            GenerationState::Generating { provider } => {
                self.state = GenerationState::Failed {
                    provider: provider.clone(),
                    error_message: error_message.into(),
                    completed_at,
                };
                Ok(())
            }
            other => Err(self.transition_error("failed", other))?,
        }
    }

    fn transition_error(&self, target: &str, current: &GenerationState) -> DataError {
        DataError::new(DataErrorKind::InvalidTransition(format!(
            "generation {} cannot move from {} to {}",
            self.id,
            current.status(),
            target
        )))
    }
}
