//! SQLite database connection and schema management.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use super::customer::SqliteCustomerRepository;
use super::item::SqliteItemRepository;
use super::review::SqliteReviewRepository;
use crate::config::{DbConfig, DbLocation};
use crate::db::schema::TABLES;
use crate::db::{Database, DbError, DbResult};

/// SQLite database implementation.
///
/// Provides access to repositories via associated types, avoiding dynamic dispatch.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open a database as described by `config`, creating the file and its
    /// parent directory when missing. Foreign keys are always enforced.
    pub async fn connect(config: &DbConfig) -> DbResult<Self> {
        let (options, pool_options) = match &config.location {
            DbLocation::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| DbError::Connection {
                            message: format!("Failed to create {}: {}", parent.display(), e),
                        })?;
                }
                (
                    SqliteConnectOptions::new()
                        .filename(path)
                        .create_if_missing(true),
                    SqlitePoolOptions::new().max_connections(config.max_connections),
                )
            }
            // A single connection that is never recycled, or the schema is lost.
            DbLocation::InMemory => (
                SqliteConnectOptions::from_str("sqlite::memory:").map_err(|e| {
                    DbError::Connection {
                        message: e.to_string(),
                    }
                })?,
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None::<Duration>)
                    .max_lifetime(None::<Duration>),
            ),
        };

        let pool = pool_options
            .connect_with(options.foreign_keys(true))
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        debug!(location = ?config.location, "Opened SQLite database");
        Ok(Self { pool })
    }

    /// Open a database file at the given path.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        Self::connect(&DbConfig::file(path.as_ref())).await
    }

    /// Create an in-memory database (useful for testing).
    pub async fn in_memory() -> DbResult<Self> {
        Self::connect(&DbConfig::in_memory()).await
    }

    /// Get the underlying pool for direct queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl Database for SqliteDatabase {
    type Customers<'a> = SqliteCustomerRepository<'a>;
    type Items<'a> = SqliteItemRepository<'a>;
    type Reviews<'a> = SqliteReviewRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        let migration_error = |e: sqlx::Error| DbError::Migration {
            message: e.to_string(),
        };

        let mut tx = self.pool.begin().await.map_err(migration_error)?;

        for table in &TABLES {
            sqlx::query(&table.create_sql())
                .execute(&mut *tx)
                .await
                .map_err(migration_error)?;

            for index in table.index_sql() {
                sqlx::query(&index)
                    .execute(&mut *tx)
                    .await
                    .map_err(migration_error)?;
            }
        }

        tx.commit().await.map_err(migration_error)?;

        info!(tables = TABLES.len(), "Schema is up to date");
        Ok(())
    }

    fn customers(&self) -> Self::Customers<'_> {
        SqliteCustomerRepository { pool: &self.pool }
    }

    fn items(&self) -> Self::Items<'_> {
        SqliteItemRepository { pool: &self.pool }
    }

    fn reviews(&self) -> Self::Reviews<'_> {
        SqliteReviewRepository { pool: &self.pool }
    }
}
