//! Caller identity.

use garb_core::UserId;
use garb_error::{AuthError, AuthErrorKind, GarbResult};

/// The identity a request runs under.
///
/// Stands in for the managed auth collaborator: something upstream resolves
/// credentials to a [`UserId`], and every service operation starts by
/// demanding one via [`Identity::user`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    user_id: Option<UserId>,
}

impl Identity {
    /// An identity resolved to a user.
    pub fn authenticated(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// An unresolved identity. Every operation on it fails authentication.
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    /// The authenticated user, or an `Unauthenticated` error.
    pub fn user(&self) -> GarbResult<UserId> {
        match self.user_id {
            Some(user_id) => Ok(user_id),
            None => Err(AuthError::new(AuthErrorKind::Unauthenticated))?,
        }
    }
}
