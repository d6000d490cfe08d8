//! SQL schema definitions.
//!
//! The schema is portable between SQLite and PostgreSQL. A `schema_version`
//! row records which layout a database was created with; opening a database
//! written by a newer release fails instead of guessing at its layout.

use super::{SqlxResultExt, SqlxStore};
use crate::store::{StoreError, StoreResult};

/// Current schema version.
pub const SCHEMA_VERSION: i64 = 1;

/// SQL statements to create the schema tables.
pub const CREATE_TABLES: &[&str] = &[
    // BIGINT for portability between SQLite and PostgreSQL
    "CREATE TABLE IF NOT EXISTS schema_version (
        version BIGINT PRIMARY KEY
    )",
    // Passwords are stored verbatim
    "CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY NOT NULL,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL
    )",
];

/// Initialize the database schema.
///
/// Creates tables if they don't exist and stamps a fresh database with
/// [`SCHEMA_VERSION`].
pub async fn initialize(store: &SqlxStore) -> StoreResult<()> {
    let pool = store.pool();

    for statement in CREATE_TABLES {
        sqlx::query(statement)
            .execute(pool)
            .await
            .sql_context(&format!("Schema creation failed - SQL: {statement}"))?;
    }

    let row: Option<(i64,)> = sqlx::query_as("SELECT version FROM schema_version")
        .fetch_optional(pool)
        .await
        .sql_context("Failed to check schema version")?;

    match row {
        None => {
            sqlx::query("INSERT INTO schema_version (version) VALUES ($1)")
                .bind(SCHEMA_VERSION)
                .execute(pool)
                .await
                .sql_context("Failed to initialize schema version")?;
        }
        Some((current,)) if current > SCHEMA_VERSION => {
            return Err(StoreError::Unavailable {
                reason: format!(
                    "database schema version {current} is newer than supported version {SCHEMA_VERSION}"
                ),
            });
        }
        Some(_) => {}
    }

    Ok(())
}
