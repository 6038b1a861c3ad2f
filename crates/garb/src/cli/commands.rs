//! CLI command definitions.

use clap::{Parser, Subcommand};
use garb_core::{ClothingCategory, ClothingItemId, ImageId, InspoImageId, ModelImageId};
use std::path::PathBuf;

/// Garb - virtual outfit try-on generation from the command line
#[derive(Parser, Debug)]
#[command(name = "garb")]
#[command(about = "Virtual outfit try-on generation service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a clothing item from an image file
    Add {
        /// Display name
        name: String,

        /// Category of the item
        #[arg(long)]
        category: ClothingCategory,

        /// Path to the image file
        #[arg(long)]
        file: PathBuf,
    },

    /// Add an entry to the shared default-clothing library
    AddDefault {
        /// Display name
        name: String,

        /// Category of the item
        #[arg(long)]
        category: ClothingCategory,

        /// Path to the image file
        #[arg(long)]
        file: PathBuf,
    },

    /// Add a model (body) image from an image file
    AddModel {
        /// Display name
        name: String,

        /// Path to the image file
        #[arg(long)]
        file: PathBuf,
    },

    /// Add an inspiration image from an image file
    AddInspo {
        /// Display name
        name: String,

        /// Path to the image file
        #[arg(long)]
        file: PathBuf,
    },

    /// List clothing items in a category
    List {
        /// Category to list
        category: ClothingCategory,
    },

    /// List the shared default-clothing library
    Defaults,

    /// Copy the default library into your wardrobe, if it is empty
    Seed,

    /// List model images, including the configured default
    Models,

    /// List inspiration images
    Inspo,

    /// Remove a model image
    RemoveModel {
        /// Id of the model image record
        id: ModelImageId,
    },

    /// Combine a top and a bottom onto the body image
    Outfit {
        /// Top clothing item id
        #[arg(long)]
        top: Option<ClothingItemId>,

        /// Bottom clothing item id
        #[arg(long)]
        bottom: Option<ClothingItemId>,

        /// Body image override (blob reference)
        #[arg(long)]
        model_image: Option<ImageId>,
    },

    /// Dress the body image for an occasion
    Nano {
        /// The occasion, interpolated into the prompt
        occasion: String,

        /// Body image override (blob reference)
        #[arg(long)]
        model_image: Option<ImageId>,
    },

    /// Transfer the outfit from an inspiration image onto the body image
    Transfer {
        /// Id of the inspiration image record
        inspiration: InspoImageId,

        /// Body image override (blob reference)
        #[arg(long)]
        model_image: Option<ImageId>,
    },

    /// Show the most recent generation
    Latest,

    /// Show today's quota usage
    Quota,
}
