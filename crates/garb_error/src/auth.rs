//! Authentication and authorization error types.

/// Kinds of auth errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AuthErrorKind {
    /// No identity could be resolved for the caller
    #[display("Not authenticated")]
    Unauthenticated,
    /// Identity resolved but does not own the target record
    #[display("Not authorized")]
    NotAuthorized,
}

/// Auth error with location tracking.
///
/// # Examples
///
/// ```
/// use garb_error::{AuthError, AuthErrorKind};
///
/// let err = AuthError::new(AuthErrorKind::Unauthenticated);
/// assert!(format!("{}", err).contains("Not authenticated"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Auth Error: {} at line {} in {}", kind, line, file)]
pub struct AuthError {
    /// The kind of error that occurred
    pub kind: AuthErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AuthError {
    /// Create a new auth error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AuthErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
