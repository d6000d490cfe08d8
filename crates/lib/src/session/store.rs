//! In-process session table.
//!
//! Maps opaque session tokens (UUIDs carried in a cookie) to the user
//! identifier they are bound to. Sessions are ephemeral and lost on restart.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::user::UserId;

/// Session token (UUID stored in cookie)
pub type SessionToken = String;

/// Shared token → identifier table
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, UserId>>>,
}

impl SessionStore {
    /// Create a new empty session store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new session bound to `id`.
    ///
    /// # Returns
    /// The session token to be stored in a cookie
    pub async fn create(&self, id: UserId) -> SessionToken {
        let token = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(token.clone(), id);
        token
    }

    /// Look up the identifier bound to `token`
    pub async fn get(&self, token: &str) -> Option<UserId> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Rebind an existing token to `id`.
    ///
    /// Returns false if the token is unknown, in which case nothing changes.
    pub async fn rebind(&self, token: &str, id: UserId) -> bool {
        match self.sessions.write().await.get_mut(token) {
            Some(slot) => {
                *slot = id;
                true
            }
            None => false,
        }
    }

    /// Destroy a session.
    ///
    /// Returns true if the token was known.
    pub async fn destroy(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Number of live sessions
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
