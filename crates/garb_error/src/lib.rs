//! Error types for the garb outfit generation service.
//!
//! This crate provides the foundation error types used throughout the garb
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use garb_error::{GarbResult, ConfigError};
//!
//! fn read_settings() -> GarbResult<String> {
//!     Err(ConfigError::new("Missing required field"))?
//! }
//!
//! match read_settings() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod config;
mod data;
mod error;
mod quota;
mod storage;

pub use auth::{AuthError, AuthErrorKind};
pub use config::ConfigError;
pub use data::{DataError, DataErrorKind};
pub use error::{GarbError, GarbErrorKind, GarbResult};
pub use quota::{QuotaError, QuotaErrorKind};
pub use storage::{StorageError, StorageErrorKind};
