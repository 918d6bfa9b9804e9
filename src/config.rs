//! Database configuration.
//!
//! Resolves where the database lives and how the connection pool is sized.
//! Defaults follow the XDG data directory layout:
//! `$XDG_DATA_HOME/reviewstore/reviewstore.db`, falling back to
//! `$HOME/.local/share/reviewstore/reviewstore.db`.

use miette::Diagnostic;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Database path override. `:memory:` selects an in-memory database.
pub const DB_ENV: &str = "REVIEWSTORE_DB";

/// Pool size override.
pub const MAX_CONNECTIONS_ENV: &str = "REVIEWSTORE_MAX_CONNECTIONS";

const APP_DIR: &str = "reviewstore";
const DB_FILE: &str = "reviewstore.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Errors raised while resolving configuration.
#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid REVIEWSTORE_MAX_CONNECTIONS value: '{value}'")]
    #[diagnostic(
        code(reviewstore::config::max_connections),
        help("Use a positive integer, e.g. REVIEWSTORE_MAX_CONNECTIONS=5")
    )]
    InvalidMaxConnections { value: String },

    #[error("Cannot locate a data directory")]
    #[diagnostic(
        code(reviewstore::config::no_data_dir),
        help("Set REVIEWSTORE_DB, XDG_DATA_HOME or HOME")
    )]
    NoDataDir,
}

/// Where the database is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    InMemory,
}

/// Connection settings for [`crate::db::SqliteDatabase::connect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub location: DbLocation,
    pub max_connections: u32,
}

impl DbConfig {
    /// File-backed database with the default pool size.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: DbLocation::File(path.into()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// In-memory database. Always a single connection, since every SQLite
    /// in-memory connection is its own database.
    pub fn in_memory() -> Self {
        Self {
            location: DbLocation::InMemory,
            max_connections: 1,
        }
    }

    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(DB_ENV).filter(|v| !v.trim().is_empty()) {
            Some(value) if value == ":memory:" => return Ok(Self::in_memory()),
            Some(path) => Self::file(path),
            None => Self::file(db_path_from(&lookup).ok_or(ConfigError::NoDataDir)?),
        };

        if let Some(raw) = lookup(MAX_CONNECTIONS_ENV) {
            config.max_connections = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidMaxConnections { value: raw })?;
        }

        Ok(config)
    }
}

fn data_dir_from<F>(lookup: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let data_home = lookup("XDG_DATA_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            lookup("HOME")
                .filter(|v| !v.is_empty())
                .map(|home| PathBuf::from(home).join(".local/share"))
        })?;

    Some(data_home.join(APP_DIR))
}

fn db_path_from<F>(lookup: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    data_dir_from(lookup).map(|dir| dir.join(DB_FILE))
}

/// XDG-compliant data directory: `~/.local/share/reviewstore/`.
pub fn get_data_dir() -> Option<PathBuf> {
    data_dir_from(&|key: &str| env::var(key).ok())
}

/// Default database file: `~/.local/share/reviewstore/reviewstore.db`.
pub fn get_db_path() -> Option<PathBuf> {
    get_data_dir().map(|dir| dir.join(DB_FILE))
}
