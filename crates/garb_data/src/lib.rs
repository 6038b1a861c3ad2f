//! Record stores for the garb outfit generation service.
//!
//! The managed document store of the original deployment is modeled as one
//! async trait per table, with in-memory backends. Generation stores also
//! publish a change event per insert/transition/delete, which is what the
//! reactive client subscribes to.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod event;
mod memory;
mod stores;

pub use event::GenerationEvent;
pub use memory::{
    MemoryClothingItemStore, MemoryDefaultClothingStore, MemoryGenerationStore,
    MemoryInspoImageStore, MemoryModelImageStore,
};
pub use stores::{
    ClothingItemStore, DefaultClothingStore, GenerationStore, InspoImageStore, ModelImageStore,
};
