//! Error types for the session layer
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SessionError {
    /// The session collaborator could not tear the session down.
    #[error("Could not destroy session: {reason}")]
    Teardown { reason: String },
}
