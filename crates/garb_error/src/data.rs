//! Data access error types.

/// Kinds of data access errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum DataErrorKind {
    /// Record not found
    #[display("Record not found: {}", _0)]
    NotFound(String),
    /// Attempted an illegal status transition
    #[display("Invalid transition: {}", _0)]
    InvalidTransition(String),
    /// The backing store or queue is no longer accepting work
    #[display("Store closed: {}", _0)]
    Closed(String),
}

/// Data access error with location tracking.
///
/// # Examples
///
/// ```
/// use garb_error::{DataError, DataErrorKind};
///
/// let err = DataError::new(DataErrorKind::NotFound("generation abc".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Data Error: {} at line {} in {}", kind, line, file)]
pub struct DataError {
    /// The kind of error that occurred
    pub kind: DataErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DataError {
    /// Create a new data error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DataErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
