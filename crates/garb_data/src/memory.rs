//! In-memory store implementations.

use crate::{
    ClothingItemStore, DefaultClothingStore, GenerationEvent, GenerationStore, InspoImageStore,
    ModelImageStore,
};
use chrono::{DateTime, Utc};
use garb_core::{
    ClothingCategory, ClothingItem, ClothingItemId, DefaultClothingItem, DefaultClothingItemId,
    Generation, GenerationId, ImageId, InspoImage, InspoImageId, ModelImage, ModelImageId, UserId,
};
use garb_error::{DataError, DataErrorKind, GarbResult};
use std::collections::HashMap;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// In-memory generation store with change-event broadcast.
#[derive(Debug)]
pub struct MemoryGenerationStore {
    records: RwLock<HashMap<GenerationId, Generation>>,
    events: broadcast::Sender<GenerationEvent>,
}

impl MemoryGenerationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            records: RwLock::new(HashMap::new()),
            events,
        }
    }

    fn publish(&self, id: GenerationId, status: garb_core::GenerationStatus, deleted: bool) {
        // Nobody listening is fine; events are advisory.
        let _ = self.events.send(GenerationEvent {
            id,
            status,
            deleted,
        });
    }

    async fn transition<F>(&self, id: &GenerationId, apply: F) -> GarbResult<()>
    where
        F: FnOnce(&mut Generation) -> GarbResult<()>,
    {
        let mut records = self.records.write().await;
        let generation = records.get_mut(id).ok_or_else(|| {
            DataError::new(DataErrorKind::NotFound(format!("generation {id}")))
        })?;
        apply(generation)?;
        let status = generation.state.status();
        drop(records);
        debug!(%id, %status, "Generation transition");
        self.publish(*id, status, false);
        Ok(())
    }
}

impl Default for MemoryGenerationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GenerationStore for MemoryGenerationStore {
    async fn insert(&self, generation: Generation) -> GarbResult<()> {
        let id = generation.id;
        let status = generation.state.status();
        self.records.write().await.insert(id, generation);
        debug!(%id, "Inserted generation");
        self.publish(id, status, false);
        Ok(())
    }

    async fn get(&self, id: &GenerationId) -> GarbResult<Option<Generation>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn mark_generating(&self, id: &GenerationId, provider: &str) -> GarbResult<()> {
        self.transition(id, |generation| generation.begin(provider))
            .await
    }

    async fn mark_completed(
        &self,
        id: &GenerationId,
        storage_id: ImageId,
        model: &str,
        completed_at: DateTime<Utc>,
    ) -> GarbResult<()> {
        self.transition(id, |generation| {
            generation.complete(storage_id, model, completed_at)
        })
        .await
    }

    async fn mark_failed(
        &self,
        id: &GenerationId,
        error_message: &str,
        completed_at: DateTime<Utc>,
    ) -> GarbResult<()> {
        self.transition(id, |generation| {
            generation.fail(error_message, completed_at)
        })
        .await
    }

    async fn latest_for_user(&self, user_id: &UserId) -> GarbResult<Option<Generation>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|generation| generation.user_id == *user_id)
            .max_by_key(|generation| generation.created_at)
            .cloned())
    }

    async fn list_for_user(&self, user_id: &UserId) -> GarbResult<Vec<Generation>> {
        let mut generations: Vec<Generation> = self
            .records
            .read()
            .await
            .values()
            .filter(|generation| generation.user_id == *user_id)
            .cloned()
            .collect();
        generations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(generations)
    }

    async fn delete(&self, id: &GenerationId) -> GarbResult<()> {
        if let Some(generation) = self.records.write().await.remove(id) {
            debug!(%id, "Deleted generation");
            self.publish(*id, generation.state.status(), true);
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<GenerationEvent> {
        self.events.subscribe()
    }
}

/// In-memory clothing item store.
#[derive(Debug, Default)]
pub struct MemoryClothingItemStore {
    records: RwLock<HashMap<ClothingItemId, ClothingItem>>,
}

impl MemoryClothingItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ClothingItemStore for MemoryClothingItemStore {
    async fn insert(&self, item: ClothingItem) -> GarbResult<()> {
        self.records.write().await.insert(item.id, item);
        Ok(())
    }

    async fn get(&self, id: &ClothingItemId) -> GarbResult<Option<ClothingItem>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        category: ClothingCategory,
    ) -> GarbResult<Vec<ClothingItem>> {
        let mut items: Vec<ClothingItem> = self
            .records
            .read()
            .await
            .values()
            .filter(|item| item.user_id == *user_id && item.category == category)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn delete(&self, id: &ClothingItemId) -> GarbResult<()> {
        self.records.write().await.remove(id);
        Ok(())
    }
}

/// In-memory default-clothing library.
#[derive(Debug, Default)]
pub struct MemoryDefaultClothingStore {
    records: RwLock<HashMap<DefaultClothingItemId, DefaultClothingItem>>,
}

impl MemoryDefaultClothingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DefaultClothingStore for MemoryDefaultClothingStore {
    async fn insert(&self, item: DefaultClothingItem) -> GarbResult<()> {
        debug!(id = %item.id, "Inserted default clothing entry");
        self.records.write().await.insert(item.id, item);
        Ok(())
    }

    async fn list(&self) -> GarbResult<Vec<DefaultClothingItem>> {
        let mut items: Vec<DefaultClothingItem> =
            self.records.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }
}

/// In-memory model image store.
#[derive(Debug, Default)]
pub struct MemoryModelImageStore {
    records: RwLock<HashMap<ModelImageId, ModelImage>>,
}

impl MemoryModelImageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ModelImageStore for MemoryModelImageStore {
    async fn insert(&self, image: ModelImage) -> GarbResult<()> {
        self.records.write().await.insert(image.id, image);
        Ok(())
    }

    async fn get(&self, id: &ModelImageId) -> GarbResult<Option<ModelImage>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn list_for_user(&self, user_id: &UserId) -> GarbResult<Vec<ModelImage>> {
        let mut images: Vec<ModelImage> = self
            .records
            .read()
            .await
            .values()
            .filter(|image| image.user_id == *user_id)
            .cloned()
            .collect();
        images.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(images)
    }

    async fn delete(&self, id: &ModelImageId) -> GarbResult<()> {
        self.records.write().await.remove(id);
        Ok(())
    }
}

/// In-memory inspiration image store.
#[derive(Debug, Default)]
pub struct MemoryInspoImageStore {
    records: RwLock<HashMap<InspoImageId, InspoImage>>,
}

impl MemoryInspoImageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl InspoImageStore for MemoryInspoImageStore {
    async fn insert(&self, image: InspoImage) -> GarbResult<()> {
        self.records.write().await.insert(image.id, image);
        Ok(())
    }

    async fn get(&self, id: &InspoImageId) -> GarbResult<Option<InspoImage>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn list_for_user(&self, user_id: &UserId) -> GarbResult<Vec<InspoImage>> {
        let mut images: Vec<InspoImage> = self
            .records
            .read()
            .await
            .values()
            .filter(|image| image.user_id == *user_id)
            .cloned()
            .collect();
        images.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(images)
    }

    async fn delete(&self, id: &InspoImageId) -> GarbResult<()> {
        self.records.write().await.remove(id);
        Ok(())
    }
}
