//! Top-level error wrapper types.

use crate::{AuthError, ConfigError, DataError, QuotaError, StorageError};

/// This is the foundation error enum. Each garb crate contributes the
/// variants for its own failure domain.
///
/// # Examples
///
/// ```
/// use garb_error::{GarbError, ConfigError};
///
/// let config_err = ConfigError::new("Missing required field");
/// let err: GarbError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum GarbErrorKind {
    /// Authentication or authorization error
    #[from(AuthError)]
    Auth(AuthError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Data access error
    #[from(DataError)]
    Data(DataError),
    /// Usage quota error
    #[from(QuotaError)]
    Quota(QuotaError),
    /// Blob storage error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Garb error with kind discrimination.
///
/// # Examples
///
/// ```
/// use garb_error::{GarbResult, ConfigError};
///
/// fn might_fail() -> GarbResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("{}", _0)]
pub struct GarbError(Box<GarbErrorKind>);

impl GarbError {
    /// Create a new error from a kind.
    pub fn new(kind: GarbErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GarbErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to GarbErrorKind
impl<T> From<T> for GarbError
where
    T: Into<GarbErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for garb operations.
///
/// # Examples
///
/// ```
/// use garb_error::{GarbResult, StorageError, StorageErrorKind};
///
/// fn fetch_blob() -> GarbResult<Vec<u8>> {
///     Err(StorageError::new(StorageErrorKind::FileRead("missing".to_string())))?
/// }
/// ```
pub type GarbResult<T> = std::result::Result<T, GarbError>;
