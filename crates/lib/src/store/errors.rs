//! Error types for user store operations.

use thiserror::Error;

/// Errors that can occur while talking to a user store.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with this username (or identifier) already exists.
    #[error("Username already exists: {username}")]
    DuplicateUsername {
        /// The username that collided
        username: String,
    },

    /// The store cannot be reached at all.
    #[error("User store unavailable: {reason}")]
    Unavailable {
        /// Why the store is unavailable
        reason: String,
    },

    /// SQL database operation failed.
    #[cfg(any(feature = "sqlite", feature = "postgres"))]
    #[error("SQL error: {reason}")]
    Sqlx {
        /// Description of the failure with context
        reason: String,
        /// The underlying sqlx error, if available
        #[source]
        source: Option<sqlx::Error>,
    },

    /// File I/O error while loading or saving a snapshot.
    #[error("File I/O error")]
    FileIo {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Snapshot could not be encoded or decoded.
    #[error("Snapshot serialization failed")]
    Serialization {
        /// The underlying serde error
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Check if this error is a uniqueness conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::DuplicateUsername { .. })
    }

    /// Check if this error means the store could not serve the request.
    pub fn is_unavailable(&self) -> bool {
        !self.is_conflict()
    }
}
