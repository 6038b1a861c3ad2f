//! Generation orchestration: admission, execution, and queries.

use crate::{Identity, JobQueue};
use chrono::Utc;
use garb_core::{
    Generation, GenerationId, GenerationMode, ImageData, ImageId, LabeledImage,
    build_nano_prompt, build_outfit_prompt, build_transfer_prompt, ClothingItemId,
    LABEL_BOTTOM_ITEM, LABEL_INSPIRATION, LABEL_PERSON, LABEL_TOP_ITEM,
};
use garb_data::{ClothingItemStore, GenerationEvent, GenerationStore};
use garb_error::{AuthError, AuthErrorKind, ConfigError, GarbResult, QuotaError, QuotaErrorKind};
use garb_provider::{GenerationInput, GenerationOutput, ImageProvider};
use garb_quota::{QuotaGate, QuotaStatus};
use garb_storage::ImageStore;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info, instrument, warn};

/// A generation with its output image URL attached.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationView {
    /// The record
    #[serde(flatten)]
    pub generation: Generation,
    /// Fetchable URL of the output image, once completed
    pub image_url: Option<String>,
}

/// The execution phase, run by the worker pool.
///
/// [`Executor::execute`] is infallible by contract: once a generation has
/// been marked generating, every problem is converted into a `Failed`
/// terminal state instead of propagating. The only abandoned cases are a
/// record deleted before execution starts, which is logged and dropped.
pub struct Executor {
    generations: Arc<dyn GenerationStore>,
    clothing: Arc<dyn ClothingItemStore>,
    images: Arc<dyn ImageStore>,
    provider: Arc<dyn ImageProvider>,
    default_body_image: Option<ImageId>,
}

impl Executor {
    /// Wire the execution phase over its collaborators.
    pub fn new(
        generations: Arc<dyn GenerationStore>,
        clothing: Arc<dyn ClothingItemStore>,
        images: Arc<dyn ImageStore>,
        provider: Arc<dyn ImageProvider>,
        default_body_image: Option<ImageId>,
    ) -> Self {
        Self {
            generations,
            clothing,
            images,
            provider,
            default_body_image,
        }
    }

    /// Run one admitted generation to a terminal state.
    #[instrument(skip(self))]
    pub async fn execute(&self, id: &GenerationId) {
        let generation = match self.generations.get(id).await {
            Ok(Some(generation)) => generation,
            Ok(None) => {
                warn!(%id, "Generation deleted before execution, abandoning");
                return;
            }
            Err(e) => {
                error!(%id, error = %e, "Could not load generation, abandoning");
                return;
            }
        };

        if let Err(e) = self.generations.mark_generating(id, self.provider.id()).await {
            warn!(%id, error = %e, "Generation vanished before it could start");
            return;
        }

        if let Err(e) = self.run(&generation).await {
            let message = e.to_string();
            warn!(%id, error = %message, "Generation failed");
            if let Err(e) = self.generations.mark_failed(id, &message, Utc::now()).await {
                error!(%id, error = %e, "Could not record generation failure");
            }
        }
    }

    async fn run(&self, generation: &Generation) -> GarbResult<()> {
        let labeled_images = self.assemble_references(generation).await?;
        let input = GenerationInput::new(generation.prompt.clone(), labeled_images);

        match self.provider.generate(&input).await {
            GenerationOutput::Success { image, model } => {
                let storage_id = self.images.store(&image.data, &image.mime_type).await?;
                if let Err(e) = self
                    .generations
                    .mark_completed(&generation.id, storage_id, &model, Utc::now())
                    .await
                {
                    // The record vanished mid-flight; its output blob must
                    // not outlive it.
                    self.images.delete(&storage_id).await?;
                    return Err(e);
                }
                info!(id = %generation.id, %storage_id, "Generation completed");
                Ok(())
            }
            GenerationOutput::Failure { error } => {
                self.generations
                    .mark_failed(&generation.id, &error, Utc::now())
                    .await?;
                info!(id = %generation.id, "Generation failed at the provider");
                Ok(())
            }
        }
    }

    /// Assemble the labeled reference images for a generation, in the order
    /// the prompt expects. References whose record or blob has disappeared
    /// are skipped silently, label and all.
    async fn assemble_references(
        &self,
        generation: &Generation,
    ) -> GarbResult<Vec<LabeledImage>> {
        let body_image_id = generation
            .model_image_id
            .or(self.default_body_image)
            .ok_or_else(|| {
                ConfigError::new(
                    "No model image selected and no default body image configured. \
                     Upload a model image or configure a default.",
                )
            })?;

        let mut references = Vec::new();
        match generation.mode {
            GenerationMode::Outfit => {
                if let Some(item_id) = &generation.top_item_id {
                    self.push_clothing(&mut references, item_id, LABEL_TOP_ITEM)
                        .await?;
                }
                if let Some(item_id) = &generation.bottom_item_id {
                    self.push_clothing(&mut references, item_id, LABEL_BOTTOM_ITEM)
                        .await?;
                }
                self.push_blob(&mut references, &body_image_id, LABEL_PERSON)
                    .await?;
            }
            GenerationMode::Nano => {
                self.push_blob(&mut references, &body_image_id, LABEL_PERSON)
                    .await?;
            }
            GenerationMode::Transfer => {
                self.push_blob(&mut references, &body_image_id, LABEL_PERSON)
                    .await?;
                if let Some(inspo_id) = &generation.inspiration_image_id {
                    self.push_blob(&mut references, inspo_id, LABEL_INSPIRATION)
                        .await?;
                }
            }
        }
        Ok(references)
    }

    async fn push_clothing(
        &self,
        references: &mut Vec<LabeledImage>,
        item_id: &ClothingItemId,
        label: &str,
    ) -> GarbResult<()> {
        if let Some(item) = self.clothing.get(item_id).await? {
            self.push_blob(references, &item.storage_id, label).await?;
        }
        Ok(())
    }

    async fn push_blob(
        &self,
        references: &mut Vec<LabeledImage>,
        storage_id: &ImageId,
        label: &str,
    ) -> GarbResult<()> {
        if let Some(stored) = self.images.get(storage_id).await? {
            let mime_type = if stored.mime_type.is_empty() {
                "image/jpeg".to_string()
            } else {
                stored.mime_type
            };
            references.push(LabeledImage::new(
                label,
                ImageData::new(stored.data, mime_type),
            ));
        }
        Ok(())
    }
}

/// The user-facing generation service.
///
/// Admission is synchronous: quota check, record insert, usage record,
/// enqueue. A refused admission creates no record and consumes no quota.
#[derive(Clone)]
pub struct Generations {
    store: Arc<dyn GenerationStore>,
    images: Arc<dyn ImageStore>,
    quota: QuotaGate,
    queue: JobQueue,
}

impl Generations {
    /// Wire the service over its collaborators.
    pub fn new(
        store: Arc<dyn GenerationStore>,
        images: Arc<dyn ImageStore>,
        quota: QuotaGate,
        queue: JobQueue,
    ) -> Self {
        Self {
            store,
            images,
            quota,
            queue,
        }
    }

    /// Start an outfit combination generation.
    #[instrument(skip(self, identity))]
    pub async fn start_outfit(
        &self,
        identity: &Identity,
        top_item_id: Option<ClothingItemId>,
        bottom_item_id: Option<ClothingItemId>,
        model_image_id: Option<ImageId>,
    ) -> GarbResult<GenerationId> {
        let generation = Generation::new(
            identity.user()?,
            GenerationMode::Outfit,
            build_outfit_prompt(),
        )
        .with_items(top_item_id, bottom_item_id)
        .with_model_image(model_image_id);
        self.admit(generation).await
    }

    /// Start an occasion-based generation.
    #[instrument(skip(self, identity, occasion))]
    pub async fn start_nano(
        &self,
        identity: &Identity,
        occasion: &str,
        model_image_id: Option<ImageId>,
    ) -> GarbResult<GenerationId> {
        let generation = Generation::new(
            identity.user()?,
            GenerationMode::Nano,
            build_nano_prompt(occasion),
        )
        .with_model_image(model_image_id);
        self.admit(generation).await
    }

    /// Start an outfit transfer generation.
    #[instrument(skip(self, identity))]
    pub async fn start_transfer(
        &self,
        identity: &Identity,
        inspiration_image_id: ImageId,
        model_image_id: Option<ImageId>,
    ) -> GarbResult<GenerationId> {
        let generation = Generation::new(
            identity.user()?,
            GenerationMode::Transfer,
            build_transfer_prompt(),
        )
        .with_inspiration(inspiration_image_id)
        .with_model_image(model_image_id);
        self.admit(generation).await
    }

    /// The admission path shared by all modes. Refusal happens before the
    /// record exists, so a rejected request leaves no trace.
    async fn admit(&self, generation: Generation) -> GarbResult<GenerationId> {
        let user = generation.user_id;
        let status = self.quota.check(&user).await?;
        if !status.allowed {
            return Err(QuotaError::new(QuotaErrorKind::Exceeded {
                used: status.used,
                limit: status.limit,
            }))?;
        }

        let id = generation.id;
        self.store.insert(generation).await?;
        self.quota.record(&user).await?;
        self.queue.enqueue(id).await?;
        info!(%id, "Admitted generation");
        Ok(id)
    }

    /// One generation with its output URL, owner-scoped.
    ///
    /// Someone else's record reads as absent rather than leaking existence.
    pub async fn get(
        &self,
        identity: &Identity,
        id: &GenerationId,
    ) -> GarbResult<Option<GenerationView>> {
        let user = identity.user()?;
        let Some(generation) = self.store.get(id).await? else {
            return Ok(None);
        };
        if generation.user_id != user {
            return Ok(None);
        }
        Ok(Some(self.view(generation).await?))
    }

    /// The most recent generation for the caller.
    pub async fn latest(&self, identity: &Identity) -> GarbResult<Option<GenerationView>> {
        let user = identity.user()?;
        match self.store.latest_for_user(&user).await? {
            Some(generation) => Ok(Some(self.view(generation).await?)),
            None => Ok(None),
        }
    }

    /// All generations for the caller, newest first.
    pub async fn list(&self, identity: &Identity) -> GarbResult<Vec<GenerationView>> {
        let user = identity.user()?;
        let records = self.store.list_for_user(&user).await?;
        let mut views = Vec::with_capacity(records.len());
        for generation in records {
            views.push(self.view(generation).await?);
        }
        Ok(views)
    }

    /// Delete a generation and its output image, if any.
    #[instrument(skip(self, identity))]
    pub async fn remove(&self, identity: &Identity, id: &GenerationId) -> GarbResult<()> {
        let user = identity.user()?;
        let Some(generation) = self.store.get(id).await? else {
            return Ok(());
        };
        if generation.user_id != user {
            return Err(AuthError::new(AuthErrorKind::NotAuthorized))?;
        }

        if let Some(storage_id) = generation.state.storage_id() {
            self.images.delete(storage_id).await?;
        }
        self.store.delete(id).await?;
        info!(%id, "Removed generation");
        Ok(())
    }

    /// Today's usage for the caller.
    pub async fn quota(&self, identity: &Identity) -> GarbResult<QuotaStatus> {
        let user = identity.user()?;
        self.quota.check(&user).await
    }

    /// Subscribe to change events for all generations.
    pub fn subscribe(&self) -> broadcast::Receiver<GenerationEvent> {
        self.store.subscribe()
    }

    async fn view(&self, generation: Generation) -> GarbResult<GenerationView> {
        let image_url = match generation.state.storage_id() {
            Some(storage_id) => self.images.get_url(storage_id).await?,
            None => None,
        };
        Ok(GenerationView {
            generation,
            image_url,
        })
    }
}
