//! In-memory user store with optional JSON snapshots.
//!
//! Records live in a HashMap keyed by identifier. The whole map can be
//! written to and read back from a JSON file, which is how the server keeps
//! accounts across restarts when no database is configured.

use std::{collections::HashMap, path::Path};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{StoreError, StoreResult, UserStore};
use crate::user::{Profile, User, UserId};

/// The current snapshot file format version.
const SNAPSHOT_VERSION: u8 = 0;

/// Serializable form of the store
#[derive(Serialize, Deserialize)]
struct Snapshot {
    #[serde(rename = "_v", default)]
    version: u8,
    users: Vec<User>,
}

/// HashMap-backed user store.
#[derive(Debug, Default)]
pub struct InMemory {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemory {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Load a store from a JSON snapshot written by [`InMemory::save_to_file`].
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let json = tokio::fs::read_to_string(path.as_ref())
            .await
            .map_err(|source| StoreError::FileIo { source })?;
        let snapshot: Snapshot =
            serde_json::from_str(&json).map_err(|source| StoreError::Serialization { source })?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StoreError::Unavailable {
                reason: format!(
                    "unsupported snapshot version {}; only version {SNAPSHOT_VERSION} is supported",
                    snapshot.version
                ),
            });
        }

        let users = snapshot
            .users
            .into_iter()
            .map(|user| (user.id.clone(), user))
            .collect();
        Ok(Self {
            users: RwLock::new(users),
        })
    }

    /// Write every record to a JSON snapshot at `path`.
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> StoreResult<()> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            users,
        };
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|source| StoreError::Serialization { source })?;
        tokio::fs::write(path.as_ref(), json)
            .await
            .map_err(|source| StoreError::FileIo { source })
    }
}

#[async_trait]
impl UserStore for InMemory {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username == username && u.password == password)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_profile(&self, id: &UserId) -> StoreResult<Option<Profile>> {
        Ok(self.users.read().await.get(id).map(User::profile))
    }

    async fn insert(&self, user: &User) -> StoreResult<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) || users.values().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateUsername {
                username: user.username.clone(),
            });
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> StoreResult<bool> {
        Ok(self.users.write().await.remove(id).is_some())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "inmemory"
    }
}
