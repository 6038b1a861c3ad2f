//! Service wiring.

use crate::{
    AppConfig, ClothingItems, Executor, Generations, InspoImages, JobQueue, ModelImages,
};
use garb_data::{
    MemoryClothingItemStore, MemoryDefaultClothingStore, MemoryGenerationStore,
    MemoryInspoImageStore, MemoryModelImageStore,
};
use garb_error::GarbResult;
use garb_provider::select_provider;
use garb_quota::{MemoryUsageStore, QuotaGate};
use garb_storage::{FileSystemStore, ImageStore};
use std::sync::Arc;
use tracing::info;

/// The assembled service: stores, provider, quota gate, worker pool, and
/// the user-facing services on top of them.
#[derive(Clone)]
pub struct App {
    /// The configuration the app was built from
    pub config: AppConfig,
    /// Blob store, exposed so callers can ingest image files directly
    pub images: Arc<dyn ImageStore>,
    /// Clothing item service
    pub clothing_items: ClothingItems,
    /// Model image service
    pub model_images: ModelImages,
    /// Inspiration image service
    pub inspo_images: InspoImages,
    /// Generation service
    pub generations: Generations,
}

impl App {
    /// Build the app with a filesystem blob store rooted at
    /// `config.media_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the media directory cannot be created.
    pub fn new(config: AppConfig) -> GarbResult<Self> {
        let images: Arc<dyn ImageStore> = Arc::new(FileSystemStore::new(&config.media_dir)?);
        Ok(Self::with_image_store(config, images))
    }

    /// Build the app over an existing blob store.
    pub fn with_image_store(config: AppConfig, images: Arc<dyn ImageStore>) -> Self {
        let generation_store = Arc::new(MemoryGenerationStore::new());
        let clothing_store = Arc::new(MemoryClothingItemStore::new());
        let default_clothing_store = Arc::new(MemoryDefaultClothingStore::new());
        let model_store = Arc::new(MemoryModelImageStore::new());
        let inspo_store = Arc::new(MemoryInspoImageStore::new());

        let provider = select_provider(&config.provider());
        info!(
            provider = provider.id(),
            model = provider.model_name(),
            workers = config.workers,
            "Starting generation service"
        );

        let executor = Arc::new(Executor::new(
            generation_store.clone(),
            clothing_store.clone(),
            images.clone(),
            provider,
            config.default_body_image,
        ));
        let queue = JobQueue::spawn(executor, config.workers);

        let quota = QuotaGate::with_limit(Arc::new(MemoryUsageStore::new()), config.daily_limit);
        let generations = Generations::new(
            generation_store.clone(),
            images.clone(),
            quota,
            queue,
        );

        let clothing_items =
            ClothingItems::new(clothing_store, default_clothing_store, images.clone());
        let model_images = ModelImages::new(
            model_store,
            images.clone(),
            config.default_body_image,
        );
        let inspo_images = InspoImages::new(inspo_store, images.clone());

        Self {
            config,
            images,
            clothing_items,
            model_images,
            inspo_images,
            generations,
        }
    }
}
