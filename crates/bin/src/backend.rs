//! User store selection and utility functions.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use turnstile::{
    UserStore,
    store::{InMemory, Offline, SqlxStore},
};

use crate::cli::{Backend, ServeArgs};

/// Snapshot file for the in-memory backend, relative to the data directory.
pub const SNAPSHOT_FILE: &str = "turnstile.json";
/// SQLite database file, relative to the data directory.
pub const SQLITE_FILE: &str = "turnstile.db";

/// The store the server runs against.
pub struct OpenedStore {
    pub store: Arc<dyn UserStore>,
    /// In-memory store and where to save it on shutdown
    pub snapshot: Option<(Arc<InMemory>, PathBuf)>,
}

impl OpenedStore {
    /// Degraded mode: every store call fails as unavailable.
    pub fn offline(reason: impl Into<String>) -> Self {
        Self {
            store: Arc::new(Offline::new(reason)),
            snapshot: None,
        }
    }

    /// Write the in-memory records back to disk, if that is how they are kept.
    pub async fn save(&self) {
        let Some((store, path)) = &self.snapshot else {
            return;
        };
        match store.save_to_file(path).await {
            Ok(()) => tracing::info!("User records saved to {}", path.display()),
            Err(e) => tracing::error!("Failed to save user records: {e:?}"),
        }
    }
}

/// Redact credentials from a PostgreSQL connection URL for safe logging
pub fn redact_postgres_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        let mut redacted = parsed.clone();
        if !parsed.username().is_empty() {
            let _ = redacted.set_username("***");
        }
        if parsed.password().is_some() {
            let _ = redacted.set_password(Some("***"));
        }
        redacted.to_string()
    } else {
        "postgres://***@<unparsable-url>".to_string()
    }
}

/// Open the configured store.
///
/// Errors are connectivity or configuration problems; the caller decides
/// whether to continue degraded.
pub async fn create_store(args: &ServeArgs) -> Result<OpenedStore, Box<dyn std::error::Error>> {
    let data_dir = args.data_dir.clone().unwrap_or_else(|| PathBuf::from("."));

    match args.backend {
        Backend::Sqlite => {
            tokio::fs::create_dir_all(&data_dir).await?;
            let db_path = data_dir.join(SQLITE_FILE);
            tracing::info!("Using SQLite store at {}", db_path.display());
            let store = SqlxStore::open_sqlite(&db_path).await?;
            Ok(OpenedStore {
                store: Arc::new(store),
                snapshot: None,
            })
        }
        Backend::Postgres => {
            let url = args
                .database_url
                .as_ref()
                .ok_or("PostgreSQL backend requires --database-url or DATABASE_URL")?;

            let display_url = redact_postgres_url(url);
            tracing::info!("Connecting to PostgreSQL store at {}", display_url);

            match SqlxStore::connect_postgres(url).await {
                Ok(store) => {
                    tracing::info!("Connected to PostgreSQL successfully");
                    Ok(OpenedStore {
                        store: Arc::new(store),
                        snapshot: None,
                    })
                }
                Err(e) => {
                    Err(format!("Failed to connect to PostgreSQL at {}: {}", display_url, e).into())
                }
            }
        }
        Backend::Inmemory => {
            tokio::fs::create_dir_all(&data_dir).await?;
            let json_path = data_dir.join(SNAPSHOT_FILE);
            tracing::info!(
                "Using in-memory store with persistence at {}",
                json_path.display()
            );
            let store = Arc::new(load_or_fresh(&json_path).await);
            Ok(OpenedStore {
                store: store.clone(),
                snapshot: Some((store, json_path)),
            })
        }
    }
}

async fn load_or_fresh(path: &Path) -> InMemory {
    if !path.exists() {
        tracing::info!("No snapshot found, starting with no users");
        return InMemory::new();
    }
    match InMemory::load_from_file(path).await {
        Ok(store) => {
            tracing::info!(
                users = store.len().await,
                "Loaded existing users from {}",
                path.display()
            );
            store
        }
        Err(e) => {
            tracing::warn!("Failed to load snapshot: {e:?}. Starting with no users.");
            InMemory::new()
        }
    }
}
