//! Store used when the configured backend could not be reached.
//!
//! The server keeps running in a degraded mode: pages that do not touch the
//! store still render, and everything else reports the store as unavailable.

use async_trait::async_trait;

use super::{StoreError, StoreResult, UserStore};
use crate::user::{Profile, User, UserId};

/// A store that fails every call with [`StoreError::Unavailable`].
#[derive(Debug, Clone)]
pub struct Offline {
    reason: String,
}

impl Offline {
    /// `reason` is reported in every error, typically the startup failure.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unavailable<T>(&self) -> StoreResult<T> {
        Err(StoreError::Unavailable {
            reason: self.reason.clone(),
        })
    }
}

#[async_trait]
impl UserStore for Offline {
    async fn find_by_username(&self, _username: &str) -> StoreResult<Option<User>> {
        self.unavailable()
    }

    async fn find_by_credentials(
        &self,
        _username: &str,
        _password: &str,
    ) -> StoreResult<Option<User>> {
        self.unavailable()
    }

    async fn find_by_id(&self, _id: &UserId) -> StoreResult<Option<User>> {
        self.unavailable()
    }

    async fn find_profile(&self, _id: &UserId) -> StoreResult<Option<Profile>> {
        self.unavailable()
    }

    async fn insert(&self, _user: &User) -> StoreResult<()> {
        self.unavailable()
    }

    async fn delete(&self, _id: &UserId) -> StoreResult<bool> {
        self.unavailable()
    }

    async fn ping(&self) -> StoreResult<()> {
        self.unavailable()
    }

    fn kind(&self) -> &'static str {
        "offline"
    }
}
