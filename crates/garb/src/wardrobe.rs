//! Wardrobe services: clothing items, model images, inspiration images.
//!
//! Each service wraps one record store plus the blob store. Reads attach a
//! fetchable `image_url`; removals delete the blob before the record so a
//! dangling record never points at missing bytes for long.

use crate::Identity;
use garb_core::{
    ClothingCategory, ClothingItem, ClothingItemId, DefaultClothingItem, ImageId, InspoImage,
    InspoImageId, ModelImage, ModelImageId,
};
use garb_data::{ClothingItemStore, DefaultClothingStore, InspoImageStore, ModelImageStore};
use garb_error::{AuthError, AuthErrorKind, GarbResult};
use garb_storage::{ImageStore, UploadTicket};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// A clothing item with its image URL attached.
#[derive(Debug, Clone, Serialize)]
pub struct ClothingItemView {
    /// The record
    #[serde(flatten)]
    pub item: ClothingItem,
    /// Fetchable URL of the item photo, when the blob store can serve one
    pub image_url: Option<String>,
}

/// A default library entry with its image URL attached.
#[derive(Debug, Clone, Serialize)]
pub struct DefaultClothingView {
    /// The record
    #[serde(flatten)]
    pub item: DefaultClothingItem,
    /// Fetchable URL of the item photo, when the blob store can serve one
    pub image_url: Option<String>,
}

/// Result of a wardrobe seeding attempt.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SeedOutcome {
    /// Whether any items were copied
    pub seeded: bool,
    /// Number of items copied
    pub count: usize,
}

/// A user's clothing item collection, plus the shared default library.
#[derive(Clone)]
pub struct ClothingItems {
    store: Arc<dyn ClothingItemStore>,
    defaults: Arc<dyn DefaultClothingStore>,
    images: Arc<dyn ImageStore>,
}

impl ClothingItems {
    /// Create the service over the record stores and a blob store.
    pub fn new(
        store: Arc<dyn ClothingItemStore>,
        defaults: Arc<dyn DefaultClothingStore>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            store,
            defaults,
            images,
        }
    }

    /// Items of one category, newest first, with image URLs attached.
    #[instrument(skip(self, identity))]
    pub async fn list(
        &self,
        identity: &Identity,
        category: ClothingCategory,
    ) -> GarbResult<Vec<ClothingItemView>> {
        let user = identity.user()?;
        let items = self.store.list_for_user(&user, category).await?;

        let mut views = Vec::with_capacity(items.len());
        for item in items {
            let image_url = self.images.get_url(&item.storage_id).await?;
            views.push(ClothingItemView { item, image_url });
        }
        Ok(views)
    }

    /// Add an item pointing at an already stored blob.
    #[instrument(skip(self, identity, name), fields(category = %category))]
    pub async fn add(
        &self,
        identity: &Identity,
        name: impl Into<String>,
        category: ClothingCategory,
        storage_id: ImageId,
    ) -> GarbResult<ClothingItem> {
        let user = identity.user()?;
        let item = ClothingItem::new(user, name, category, storage_id);
        self.store.insert(item.clone()).await?;
        info!(id = %item.id, "Added clothing item");
        Ok(item)
    }

    /// Remove an item and its stored photo. Removing an absent item is a
    /// no-op; removing someone else's item is `NotAuthorized`.
    #[instrument(skip(self, identity))]
    pub async fn remove(&self, identity: &Identity, id: &ClothingItemId) -> GarbResult<()> {
        let user = identity.user()?;
        let Some(item) = self.store.get(id).await? else {
            return Ok(());
        };
        if item.user_id != user {
            return Err(AuthError::new(AuthErrorKind::NotAuthorized))?;
        }

        self.images.delete(&item.storage_id).await?;
        self.store.delete(id).await?;
        info!(%id, "Removed clothing item");
        Ok(())
    }

    /// The shared default library, with image URLs attached. Visible to
    /// every caller, so no identity is required.
    pub async fn list_defaults(&self) -> GarbResult<Vec<DefaultClothingView>> {
        let items = self.defaults.list().await?;

        let mut views = Vec::with_capacity(items.len());
        for item in items {
            let image_url = self.images.get_url(&item.storage_id).await?;
            views.push(DefaultClothingView { item, image_url });
        }
        Ok(views)
    }

    /// Add an entry to the shared default library.
    #[instrument(skip(self, identity, name), fields(category = %category))]
    pub async fn add_default(
        &self,
        identity: &Identity,
        name: impl Into<String>,
        category: ClothingCategory,
        storage_id: ImageId,
    ) -> GarbResult<DefaultClothingItem> {
        identity.user()?;
        let item = DefaultClothingItem::new(name, category, storage_id);
        self.defaults.insert(item.clone()).await?;
        info!(id = %item.id, "Added default clothing entry");
        Ok(item)
    }

    /// Copy the default library into the caller's wardrobe.
    ///
    /// A wardrobe that already has any item is left alone; seeding happens
    /// at most once per user. Seeded items share the library's blobs.
    #[instrument(skip(self, identity))]
    pub async fn seed(&self, identity: &Identity) -> GarbResult<SeedOutcome> {
        let user = identity.user()?;

        let has_tops = !self
            .store
            .list_for_user(&user, ClothingCategory::Tops)
            .await?
            .is_empty();
        let has_bottoms = !self
            .store
            .list_for_user(&user, ClothingCategory::Bottoms)
            .await?
            .is_empty();
        if has_tops || has_bottoms {
            return Ok(SeedOutcome {
                seeded: false,
                count: 0,
            });
        }

        let defaults = self.defaults.list().await?;
        let count = defaults.len();
        for default in defaults {
            let item = ClothingItem::new(user, default.name, default.category, default.storage_id);
            self.store.insert(item).await?;
        }
        info!(%user, count, "Seeded wardrobe from the default library");
        Ok(SeedOutcome {
            seeded: true,
            count,
        })
    }

    /// Issue a direct-upload grant, if the blob store supports them.
    pub async fn upload_url(&self, identity: &Identity) -> GarbResult<Option<UploadTicket>> {
        identity.user()?;
        self.images.upload_url().await
    }
}

/// A model image entry, either a user record or the configured default.
#[derive(Debug, Clone, Serialize)]
pub struct ModelImageView {
    /// Record id; `None` for the configured default entry
    pub id: Option<ModelImageId>,
    /// Display name
    pub name: String,
    /// Blob reference of the photo
    pub storage_id: ImageId,
    /// Fetchable URL of the photo
    pub image_url: Option<String>,
    /// Whether this is the configured default body image
    pub is_default: bool,
}

/// A user's body photo collection.
#[derive(Clone)]
pub struct ModelImages {
    store: Arc<dyn ModelImageStore>,
    images: Arc<dyn ImageStore>,
    default_body_image: Option<ImageId>,
}

impl ModelImages {
    /// Create the service. `default_body_image` is the deployment-wide
    /// fallback body photo, prepended to every listing.
    pub fn new(
        store: Arc<dyn ModelImageStore>,
        images: Arc<dyn ImageStore>,
        default_body_image: Option<ImageId>,
    ) -> Self {
        Self {
            store,
            images,
            default_body_image,
        }
    }

    /// Model images, newest first, with the configured default prepended
    /// when it is set and its blob is still fetchable.
    #[instrument(skip(self, identity))]
    pub async fn list(&self, identity: &Identity) -> GarbResult<Vec<ModelImageView>> {
        let user = identity.user()?;
        let records = self.store.list_for_user(&user).await?;

        let mut views = Vec::with_capacity(records.len() + 1);
        if let Some(storage_id) = self.default_body_image {
            if let Some(url) = self.images.get_url(&storage_id).await? {
                views.push(ModelImageView {
                    id: None,
                    name: "Default".to_string(),
                    storage_id,
                    image_url: Some(url),
                    is_default: true,
                });
            }
        }
        for record in records {
            let image_url = self.images.get_url(&record.storage_id).await?;
            views.push(ModelImageView {
                id: Some(record.id),
                name: record.name,
                storage_id: record.storage_id,
                image_url,
                is_default: false,
            });
        }
        Ok(views)
    }

    /// Add a model image pointing at an already stored blob.
    #[instrument(skip(self, identity, name))]
    pub async fn add(
        &self,
        identity: &Identity,
        name: impl Into<String>,
        storage_id: ImageId,
    ) -> GarbResult<ModelImage> {
        let user = identity.user()?;
        let record = ModelImage::new(user, name, storage_id);
        self.store.insert(record.clone()).await?;
        info!(id = %record.id, "Added model image");
        Ok(record)
    }

    /// Remove a model image and its stored photo.
    #[instrument(skip(self, identity))]
    pub async fn remove(&self, identity: &Identity, id: &ModelImageId) -> GarbResult<()> {
        let user = identity.user()?;
        let Some(record) = self.store.get(id).await? else {
            return Ok(());
        };
        if record.user_id != user {
            return Err(AuthError::new(AuthErrorKind::NotAuthorized))?;
        }

        self.images.delete(&record.storage_id).await?;
        self.store.delete(id).await?;
        info!(%id, "Removed model image");
        Ok(())
    }

    /// Issue a direct-upload grant, if the blob store supports them.
    pub async fn upload_url(&self, identity: &Identity) -> GarbResult<Option<UploadTicket>> {
        identity.user()?;
        self.images.upload_url().await
    }
}

/// An inspiration image with its URL attached.
#[derive(Debug, Clone, Serialize)]
pub struct InspoImageView {
    /// The record
    #[serde(flatten)]
    pub image: InspoImage,
    /// Fetchable URL of the photo
    pub image_url: Option<String>,
}

/// A user's inspiration photo collection, used by transfer mode.
#[derive(Clone)]
pub struct InspoImages {
    store: Arc<dyn InspoImageStore>,
    images: Arc<dyn ImageStore>,
}

impl InspoImages {
    /// Create the service over a record store and a blob store.
    pub fn new(store: Arc<dyn InspoImageStore>, images: Arc<dyn ImageStore>) -> Self {
        Self { store, images }
    }

    /// Inspiration images, newest first, with image URLs attached.
    #[instrument(skip(self, identity))]
    pub async fn list(&self, identity: &Identity) -> GarbResult<Vec<InspoImageView>> {
        let user = identity.user()?;
        let records = self.store.list_for_user(&user).await?;

        let mut views = Vec::with_capacity(records.len());
        for image in records {
            let image_url = self.images.get_url(&image.storage_id).await?;
            views.push(InspoImageView { image, image_url });
        }
        Ok(views)
    }

    /// Add an inspiration image pointing at an already stored blob.
    #[instrument(skip(self, identity, name))]
    pub async fn add(
        &self,
        identity: &Identity,
        name: impl Into<String>,
        storage_id: ImageId,
    ) -> GarbResult<InspoImage> {
        let user = identity.user()?;
        let record = InspoImage::new(user, name, storage_id);
        self.store.insert(record.clone()).await?;
        info!(id = %record.id, "Added inspiration image");
        Ok(record)
    }

    /// Remove an inspiration image and its stored photo.
    #[instrument(skip(self, identity))]
    pub async fn remove(&self, identity: &Identity, id: &InspoImageId) -> GarbResult<()> {
        let user = identity.user()?;
        let Some(record) = self.store.get(id).await? else {
            return Ok(());
        };
        if record.user_id != user {
            return Err(AuthError::new(AuthErrorKind::NotAuthorized))?;
        }

        self.images.delete(&record.storage_id).await?;
        self.store.delete(id).await?;
        info!(%id, "Removed inspiration image");
        Ok(())
    }

    /// Issue a direct-upload grant, if the blob store supports them.
    pub async fn upload_url(&self, identity: &Identity) -> GarbResult<Option<UploadTicket>> {
        identity.user()?;
        self.images.upload_url().await
    }
}
