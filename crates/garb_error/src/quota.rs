//! Usage quota error types.

/// Kinds of quota errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum QuotaErrorKind {
    /// The caller has exhausted today's generation allowance
    #[display("Daily limit reached: {} of {} generations used", used, limit)]
    Exceeded {
        /// Generations used so far today
        used: u32,
        /// Daily allowance
        limit: u32,
    },
}

/// Quota error with location tracking.
///
/// # Examples
///
/// ```
/// use garb_error::{QuotaError, QuotaErrorKind};
///
/// let err = QuotaError::new(QuotaErrorKind::Exceeded { used: 10, limit: 10 });
/// assert!(format!("{}", err).contains("Daily limit"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Quota Error: {} at line {} in {}", kind, line, file)]
pub struct QuotaError {
    /// The kind of error that occurred
    pub kind: QuotaErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl QuotaError {
    /// Create a new quota error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: QuotaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
