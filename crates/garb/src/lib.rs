#![forbid(unsafe_code)]
#![warn(missing_docs)]
//! Virtual outfit try-on generation service.
//!
//! Users keep wardrobes of clothing, body, and inspiration photos; a
//! generation request composites them into one output image through an
//! external multimodal chat-completions API. Admission is synchronous and
//! quota-gated; execution runs on a bounded in-process worker pool and
//! always lands the generation in a terminal state.
//!
//! [`App::new`] wires the stores, provider, quota gate, and workers from an
//! [`AppConfig`]; the `garb` binary drives the same services from the
//! command line.

mod app;
mod auth;
mod config;
mod generations;
mod wardrobe;
mod worker;

pub use app::App;
pub use auth::Identity;
pub use config::AppConfig;
pub use generations::{Executor, GenerationView, Generations};
pub use wardrobe::{
    ClothingItemView, ClothingItems, DefaultClothingView, InspoImageView, InspoImages,
    ModelImageView, ModelImages, SeedOutcome,
};
pub use worker::JobQueue;
