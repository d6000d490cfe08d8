//! Error types for the request handlers
use thiserror::Error;

use crate::session::SessionError;
use crate::store::StoreError;
use crate::user::UserId;

/// Every failure a handler can report to its caller.
///
/// None of these are retried or recovered from; the caller reports them and
/// stops processing the request.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Username already taken: {username}")]
    DuplicateUsername { username: String },

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User not found: {id}")]
    UserNotFound { id: UserId },

    #[error("No user is logged in")]
    NoActiveSession,

    #[error("Could not log out: {reason}")]
    SessionTeardown { reason: String },

    #[error("User store unavailable")]
    StoreUnavailable {
        #[source]
        source: StoreError,
    },

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },
}

impl AuthError {
    /// Check if the caller is at fault (as opposed to the server).
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            AuthError::SessionTeardown { .. } | AuthError::StoreUnavailable { .. }
        )
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AuthError::UserNotFound { .. })
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername { username } => AuthError::DuplicateUsername { username },
            source => AuthError::StoreUnavailable { source },
        }
    }
}

impl From<SessionError> for AuthError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Teardown { reason } => AuthError::SessionTeardown { reason },
        }
    }
}
