//! CLI argument definitions for the Turnstile binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// User store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// SQLite database file in the data directory (default)
    Sqlite,
    /// PostgreSQL database, requires --database-url
    Postgres,
    /// In-memory with a JSON snapshot in the data directory
    Inmemory,
}

/// Turnstile session-based account server
#[derive(Parser, Debug)]
#[command(name = "turnstile")]
#[command(about = "Turnstile: register, log in, see who else is here")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Used when no subcommand is given
    #[command(flatten)]
    pub serve: ServeArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Turnstile server
    Serve(ServeArgs),
    /// Check health of a running Turnstile server
    Health(HealthArgs),
}

/// Arguments for the serve command
#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8000, env = "TURNSTILE_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "TURNSTILE_HOST")]
    pub host: String,

    /// User store backend
    #[arg(short, long, default_value = "sqlite", env = "TURNSTILE_BACKEND")]
    pub backend: Backend,

    /// Data directory for storage files.
    /// For SQLite: stores turnstile.db
    /// For InMemory: stores turnstile.json
    #[arg(short = 'D', long, env = "TURNSTILE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// PostgreSQL connection URL (required when backend=postgres)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Secret used to sign session cookies
    #[arg(long, default_value = DEFAULT_SESSION_SECRET, env = "SESSION_SECRET", hide_env_values = true)]
    pub session_secret: String,
}

/// Fallback cookie signing secret. Anyone who knows it can forge sessions.
pub const DEFAULT_SESSION_SECRET: &str = "defaultSecret";

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Base URL of the server to check
    #[arg(long, default_value = "http://127.0.0.1:8000", env = "TURNSTILE_URL")]
    pub url: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}
