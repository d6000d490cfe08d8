//! SQL-backed user store.
//!
//! Uses sqlx with `AnyPool` so the same queries run against SQLite and
//! PostgreSQL. The whole collection is a single `users` table; the
//! username uniqueness invariant is a `UNIQUE` constraint, so concurrent
//! registrations of the same name cannot both succeed.
//!
//! The schema is created on connect. See [`schema`] for the version guard.

/// Schema definition and version guard.
pub mod schema;

use async_trait::async_trait;
use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;

use super::{StoreError, StoreResult, UserStore};
use crate::user::{Profile, User, UserId};

/// Extension trait for sqlx Result types to simplify error handling.
///
/// Converts sqlx errors to `StoreError::Sqlx` with a context message.
pub(crate) trait SqlxResultExt<T> {
    fn sql_context(self, context: &str) -> StoreResult<T>;
}

impl<T> SqlxResultExt<T> for std::result::Result<T, sqlx::Error> {
    fn sql_context(self, context: &str) -> StoreResult<T> {
        self.map_err(|e| StoreError::Sqlx {
            reason: format!("{context}: {e}"),
            source: Some(e),
        })
    }
}

/// User store over a sqlx connection pool.
pub struct SqlxStore {
    pool: AnyPool,
    /// "sqlite" or "postgres"
    kind: &'static str,
}

impl SqlxStore {
    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }
}

#[cfg(feature = "sqlite")]
impl SqlxStore {
    /// Open a SQLite database file, creating it and the schema if needed.
    pub async fn open_sqlite<P: AsRef<std::path::Path>>(path: P) -> StoreResult<Self> {
        // mode=rwc: read-write-create
        let url = format!("sqlite:{}?mode=rwc", path.as_ref().display());
        Self::connect_sqlite(&url).await
    }

    /// Connect to a SQLite database using a connection URL.
    pub async fn connect_sqlite(url: &str) -> StoreResult<Self> {
        sqlx::any::install_default_drivers();

        let is_in_memory = url.contains("mode=memory");

        // A shared-cache in-memory database disappears with its last
        // connection, so keep one open for the lifetime of the pool.
        let pool = if is_in_memory {
            AnyPoolOptions::new()
                .max_connections(5)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(url)
                .await
                .sql_context("Failed to connect to SQLite")?
        } else {
            AnyPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await
                .sql_context("Failed to connect to SQLite")?
        };

        if is_in_memory {
            sqlx::query("PRAGMA busy_timeout = 5000;")
                .execute(&pool)
                .await
                .sql_context("Failed to configure SQLite")?;
        } else {
            sqlx::query(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;",
            )
            .execute(&pool)
            .await
            .sql_context("Failed to configure SQLite")?;
        }

        let store = Self {
            pool,
            kind: "sqlite",
        };
        schema::initialize(&store).await?;
        Ok(store)
    }

    /// Create a private in-memory SQLite database.
    ///
    /// Each call gets its own database, which makes it suitable for tests.
    pub async fn sqlite_in_memory() -> StoreResult<Self> {
        let unique_id = uuid::Uuid::new_v4();
        let url = format!("sqlite:file:mem_{unique_id}?mode=memory&cache=shared");
        Self::connect_sqlite(&url).await
    }
}

#[cfg(feature = "postgres")]
impl SqlxStore {
    /// Connect to a PostgreSQL database and initialise the schema.
    pub async fn connect_postgres(url: &str) -> StoreResult<Self> {
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(10)
            .connect(url)
            .await
            .sql_context("Failed to connect to PostgreSQL")?;

        let store = Self {
            pool,
            kind: "postgres",
        };
        schema::initialize(&store).await?;
        Ok(store)
    }
}

type UserRow = (String, String, String);

fn user_from_row((id, username, password): UserRow) -> User {
    User {
        id: UserId::from(id),
        username,
        password,
    }
}

#[async_trait]
impl UserStore for SqlxStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, username, password FROM users WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .sql_context("Failed to look up user by username")?;
        Ok(row.map(user_from_row))
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> StoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, password FROM users WHERE username = $1 AND password = $2",
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await
        .sql_context("Failed to look up user by credentials")?;
        Ok(row.map(user_from_row))
    }

    async fn find_by_id(&self, id: &UserId) -> StoreResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, username, password FROM users WHERE id = $1")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .sql_context("Failed to look up user by id")?;
        Ok(row.map(user_from_row))
    }

    async fn find_profile(&self, id: &UserId) -> StoreResult<Option<Profile>> {
        let row: Option<(String, String)> =
            sqlx::query_as("SELECT id, username FROM users WHERE id = $1")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .sql_context("Failed to look up profile")?;
        Ok(row.map(|(id, username)| Profile {
            id: UserId::from(id),
            username,
        }))
    }

    async fn insert(&self, user: &User) -> StoreResult<()> {
        let result = sqlx::query("INSERT INTO users (id, username, password) VALUES ($1, $2, $3)")
            .bind(user.id.as_str())
            .bind(&user.username)
            .bind(&user.password)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e)
                if e.as_database_error()
                    .is_some_and(|db| db.is_unique_violation()) =>
            {
                Err(StoreError::DuplicateUsername {
                    username: user.username.clone(),
                })
            }
            Err(e) => Err(e).sql_context("Failed to insert user"),
        }
    }

    async fn delete(&self, id: &UserId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .sql_context("Failed to delete user")?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .sql_context("Ping failed")
            .map(|_| ())
    }

    fn kind(&self) -> &'static str {
        self.kind
    }
}
