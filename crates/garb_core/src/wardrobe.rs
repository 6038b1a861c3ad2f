//! Wardrobe records: clothing items, model images, inspiration images.
//!
//! These have no lifecycle beyond create/list/delete. Each names a stored
//! image blob and belongs to one user.

use crate::{ClothingItemId, DefaultClothingItemId, ImageId, InspoImageId, ModelImageId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Clothing item category.
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
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ClothingCategory {
    /// Shirts, jackets, blouses
    Tops,
    /// Trousers, skirts, shorts
    Bottoms,
}

/// A clothing photo in a user's wardrobe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    /// Unique id of this item
    pub id: ClothingItemId,
    /// Owning user
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Tops or bottoms
    pub category: ClothingCategory,
    /// Blob reference of the item photo
    pub storage_id: ImageId,
    /// When the record was inserted
    pub created_at: DateTime<Utc>,
}

impl ClothingItem {
    /// Create a new clothing item record.
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        category: ClothingCategory,
        storage_id: ImageId,
    ) -> Self {
        Self {
            id: ClothingItemId::new(),
            user_id,
            name: name.into(),
            category,
            storage_id,
            created_at: Utc::now(),
        }
    }
}

/// An entry in the shared default-clothing library.
///
/// Defaults belong to no user; seeding copies them into a wardrobe as
/// ordinary [`ClothingItem`] records sharing the same blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultClothingItem {
    /// Unique id of this entry
    pub id: DefaultClothingItemId,
    /// Display name
    pub name: String,
    /// Tops or bottoms
    pub category: ClothingCategory,
    /// Blob reference of the item photo
    pub storage_id: ImageId,
}

impl DefaultClothingItem {
    /// Create a new default library entry.
    pub fn new(name: impl Into<String>, category: ClothingCategory, storage_id: ImageId) -> Self {
        Self {
            id: DefaultClothingItemId::new(),
            name: name.into(),
            category,
            storage_id,
        }
    }
}

/// A body photo the generated outfit is composited onto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelImage {
    /// Unique id of this model image
    pub id: ModelImageId,
    /// Owning user
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Blob reference of the photo
    pub storage_id: ImageId,
    /// When the record was inserted
    pub created_at: DateTime<Utc>,
}

impl ModelImage {
    /// Create a new model image record.
    pub fn new(user_id: UserId, name: impl Into<String>, storage_id: ImageId) -> Self {
        Self {
            id: ModelImageId::new(),
            user_id,
            name: name.into(),
            storage_id,
            created_at: Utc::now(),
        }
    }
}

/// An inspiration outfit photo used by transfer mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspoImage {
    /// Unique id of this inspiration image
    pub id: InspoImageId,
    /// Owning user
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Blob reference of the photo
    pub storage_id: ImageId,
    /// When the record was inserted
    pub created_at: DateTime<Utc>,
}

impl InspoImage {
    /// Create a new inspiration image record.
    pub fn new(user_id: UserId, name: impl Into<String>, storage_id: ImageId) -> Self {
        Self {
            id: InspoImageId::new(),
            user_id,
            name: name.into(),
            storage_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_round_trip_through_strings() {
        let category: ClothingCategory = "tops".parse().unwrap();
        assert_eq!(category, ClothingCategory::Tops);
        assert_eq!(ClothingCategory::Bottoms.to_string(), "bottoms");
    }
}
