//! Store trait definitions, one per table.

use crate::GenerationEvent;
use chrono::{DateTime, Utc};
use garb_core::{
    ClothingCategory, ClothingItem, ClothingItemId, DefaultClothingItem, Generation, GenerationId,
    ImageId, InspoImage, InspoImageId, ModelImage, ModelImageId, UserId,
};
use garb_error::GarbResult;
use tokio::sync::broadcast;

/// Store for generation records.
///
/// Status transitions go through the `mark_*` operations, which apply the
/// state machine on [`Generation`], so a backend can never persist an
/// illegal transition. Every successful mutation publishes a
/// [`GenerationEvent`].
#[async_trait::async_trait]
pub trait GenerationStore: Send + Sync {
    /// Insert a freshly admitted generation.
    async fn insert(&self, generation: Generation) -> GarbResult<()>;

    /// Point lookup by id.
    async fn get(&self, id: &GenerationId) -> GarbResult<Option<Generation>>;

    /// Transition `pending -> generating`, recording the provider id.
    ///
    /// Returns a `NotFound` data error if the record was deleted.
    async fn mark_generating(&self, id: &GenerationId, provider: &str) -> GarbResult<()>;

    /// Transition `generating -> completed` with the stored output.
    async fn mark_completed(
        &self,
        id: &GenerationId,
        storage_id: ImageId,
        model: &str,
        completed_at: DateTime<Utc>,
    ) -> GarbResult<()>;

    /// Transition `generating -> failed` with the failure description.
    async fn mark_failed(
        &self,
        id: &GenerationId,
        error_message: &str,
        completed_at: DateTime<Utc>,
    ) -> GarbResult<()>;

    /// Most recent generation for a user, by creation time.
    async fn latest_for_user(&self, user_id: &UserId) -> GarbResult<Option<Generation>>;

    /// All generations for a user, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> GarbResult<Vec<Generation>>;

    /// Delete a record. Deleting an absent record is a no-op.
    async fn delete(&self, id: &GenerationId) -> GarbResult<()>;

    /// Subscribe to change events for all generations.
    fn subscribe(&self) -> broadcast::Receiver<GenerationEvent>;
}

/// Store for clothing item records.
#[async_trait::async_trait]
pub trait ClothingItemStore: Send + Sync {
    /// Insert a new clothing item.
    async fn insert(&self, item: ClothingItem) -> GarbResult<()>;

    /// Point lookup by id.
    async fn get(&self, id: &ClothingItemId) -> GarbResult<Option<ClothingItem>>;

    /// Items of one category for a user, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        category: ClothingCategory,
    ) -> GarbResult<Vec<ClothingItem>>;

    /// Delete a record. Deleting an absent record is a no-op.
    async fn delete(&self, id: &ClothingItemId) -> GarbResult<()>;
}

/// Store for the shared default-clothing library.
///
/// Defaults are deployment-wide, so there is no per-user scoping.
#[async_trait::async_trait]
pub trait DefaultClothingStore: Send + Sync {
    /// Insert a new default library entry.
    async fn insert(&self, item: DefaultClothingItem) -> GarbResult<()>;

    /// All entries, ordered by name.
    async fn list(&self) -> GarbResult<Vec<DefaultClothingItem>>;
}

/// Store for model (body) image records.
#[async_trait::async_trait]
pub trait ModelImageStore: Send + Sync {
    /// Insert a new model image.
    async fn insert(&self, image: ModelImage) -> GarbResult<()>;

    /// Point lookup by id.
    async fn get(&self, id: &ModelImageId) -> GarbResult<Option<ModelImage>>;

    /// Model images for a user, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> GarbResult<Vec<ModelImage>>;

    /// Delete a record. Deleting an absent record is a no-op.
    async fn delete(&self, id: &ModelImageId) -> GarbResult<()>;
}

/// Store for inspiration image records.
#[async_trait::async_trait]
pub trait InspoImageStore: Send + Sync {
    /// Insert a new inspiration image.
    async fn insert(&self, image: InspoImage) -> GarbResult<()>;

    /// Point lookup by id.
    async fn get(&self, id: &InspoImageId) -> GarbResult<Option<InspoImage>>;

    /// Inspiration images for a user, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> GarbResult<Vec<InspoImage>>;

    /// Delete a record. Deleting an absent record is a no-op.
    async fn delete(&self, id: &InspoImageId) -> GarbResult<()>;
}
