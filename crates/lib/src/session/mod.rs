//! Per-request session capability.
//!
//! Handlers never reach into ambient request state. Each invocation receives
//! a [`SessionContext`], a small key-value capability that knows at most one
//! thing: which user identifier the current browser session is bound to.
//!
//! The cookie-backed implementation lives in the server binary. This module
//! provides the shared token table it stores bindings in ([`SessionStore`])
//! and a standalone [`MemorySession`] for embedding and tests.

mod errors;
mod store;

use async_trait::async_trait;
use tokio::sync::RwLock;

pub use errors::SessionError;
pub use store::{SessionStore, SessionToken};

use crate::user::UserId;

/// Binding between one browser session and a stored user identifier.
#[async_trait]
pub trait SessionContext: Send + Sync {
    /// The identifier bound to this session, if any.
    async fn user_id(&self) -> Option<UserId>;

    /// Bind this session to `id`, replacing any previous binding.
    async fn bind(&self, id: UserId);

    /// Destroy the session entirely.
    ///
    /// After a successful call `user_id` returns `None`.
    async fn destroy(&self) -> Result<(), SessionError>;
}

/// A session held entirely in memory, detached from any transport.
#[derive(Debug, Default)]
pub struct MemorySession {
    bound: RwLock<Option<UserId>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session already bound to `id`.
    pub fn bound_to(id: UserId) -> Self {
        Self {
            bound: RwLock::new(Some(id)),
        }
    }
}

#[async_trait]
impl SessionContext for MemorySession {
    async fn user_id(&self) -> Option<UserId> {
        self.bound.read().await.clone()
    }

    async fn bind(&self, id: UserId) {
        *self.bound.write().await = Some(id);
    }

    async fn destroy(&self) -> Result<(), SessionError> {
        *self.bound.write().await = None;
        Ok(())
    }
}
