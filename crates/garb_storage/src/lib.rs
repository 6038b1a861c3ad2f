//! Image blob storage for the garb outfit generation service.
//!
//! The managed blob service of the original deployment is modeled by the
//! [`ImageStore`] trait: opaque references in, bytes out. Two backends are
//! provided: a filesystem store for local deployments and an in-memory
//! store for tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod memory;
mod store;

pub use filesystem::FileSystemStore;
pub use memory::MemoryStore;
pub use store::{ImageStore, StoredImage, UploadTicket};
