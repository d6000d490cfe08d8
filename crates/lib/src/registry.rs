//! Registry of usernames currently considered logged in.
//!
//! [`ActiveUsers`] is an ordered set: insertion order is preserved and a
//! username appears at most once. It is owned by the service instance and
//! handed to the handlers, never stored in a global.
//!
//! Each operation takes the lock on its own, so a single `add` or `remove`
//! is never torn. The handler sequences built on top of it (look up a user,
//! then add or remove the name, then touch the store) are not serialised
//! against each other. Racing logins and logouts for the same username can
//! still leave a stale entry or drop one that should remain. Entries are
//! also never removed when a session simply expires.

use std::sync::Arc;

use tokio::sync::RwLock;

/// Process-wide ordered set of logged-in usernames.
#[derive(Clone, Debug, Default)]
pub struct ActiveUsers {
    names: Arc<RwLock<Vec<String>>>,
}

impl ActiveUsers {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `username` unless it is already present.
    ///
    /// Returns true when the name was added.
    pub async fn add(&self, username: &str) -> bool {
        let mut names = self.names.write().await;
        if names.iter().any(|n| n == username) {
            return false;
        }
        names.push(username.to_string());
        tracing::debug!(username, active = names.len(), "Added active user");
        true
    }

    /// Remove the entry for `username` if present.
    ///
    /// Returns true when an entry was removed.
    pub async fn remove(&self, username: &str) -> bool {
        let mut names = self.names.write().await;
        match names.iter().position(|n| n == username) {
            Some(index) => {
                names.remove(index);
                tracing::debug!(username, active = names.len(), "Removed active user");
                true
            }
            None => false,
        }
    }

    /// Snapshot of the registry in insertion order.
    pub async fn list(&self) -> Vec<String> {
        self.names.read().await.clone()
    }

    pub async fn contains(&self, username: &str) -> bool {
        self.names.read().await.iter().any(|n| n == username)
    }

    pub async fn len(&self) -> usize {
        self.names.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.names.read().await.is_empty()
    }
}
