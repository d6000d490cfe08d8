//! Persistent storage for user records.
//!
//! [`UserStore`] is the boundary to the external document store. It exposes
//! exactly the lookups the handlers need and enforces the one invariant the
//! handlers cannot: at most one record per username.
//!
//! ## Available Stores
//!
//! - [`InMemory`]: HashMap-backed, optionally snapshotted to a JSON file
//! - [`SqlxStore`] (features `sqlite` / `postgres`): one `users` table via sqlx
//! - [`Offline`]: placeholder used when the configured store could not be
//!   reached at startup; every call fails as unavailable

mod errors;
mod in_memory;
mod offline;
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub mod sql;

use async_trait::async_trait;

pub use errors::StoreError;
pub use in_memory::InMemory;
pub use offline::Offline;
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub use sql::SqlxStore;

use crate::user::{Profile, User, UserId};

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Create/read/delete access to the user collection.
///
/// Every call is an independent round-trip that may fail on its own. Nothing
/// is retried; failures surface to the caller.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find the record with exactly this username.
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Find the record whose username and password both match exactly.
    async fn find_by_credentials(&self, username: &str, password: &str)
    -> StoreResult<Option<User>>;

    /// Find the record with this identifier.
    async fn find_by_id(&self, id: &UserId) -> StoreResult<Option<User>>;

    /// Find the record with this identifier, without its password.
    async fn find_profile(&self, id: &UserId) -> StoreResult<Option<Profile>>;

    /// Persist a new record.
    ///
    /// Fails with [`StoreError::DuplicateUsername`] if the username or
    /// identifier is already taken.
    async fn insert(&self, user: &User) -> StoreResult<()>;

    /// Delete the record with this identifier. Returns true if one existed.
    async fn delete(&self, id: &UserId) -> StoreResult<bool>;

    /// Round-trip to the store to confirm it is reachable.
    async fn ping(&self) -> StoreResult<()>;

    /// Short label for logs and health output.
    fn kind(&self) -> &'static str;
}
