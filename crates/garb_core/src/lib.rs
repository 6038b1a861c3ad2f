//! Core data types for the garb outfit generation service.
//!
//! This crate provides the domain model shared across the garb workspace:
//! typed identifiers, the generation state machine, wardrobe records,
//! reference image payloads, and the prompt builders for each generation
//! mode.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod generation;
mod id;
mod image;
mod mode;
mod prompt;
mod state;
mod wardrobe;

pub use generation::Generation;
pub use id::{
    ClothingItemId, DefaultClothingItemId, GenerationId, ImageId, InspoImageId, ModelImageId,
    UserId,
};
pub use image::{
    ImageData, LabeledImage, LABEL_BOTTOM_ITEM, LABEL_INSPIRATION, LABEL_PERSON, LABEL_TOP_ITEM,
};
pub use mode::GenerationMode;
pub use prompt::{build_nano_prompt, build_outfit_prompt, build_transfer_prompt};
pub use state::{GenerationState, GenerationStatus};
pub use wardrobe::{ClothingCategory, ClothingItem, DefaultClothingItem, InspoImage, ModelImage};
