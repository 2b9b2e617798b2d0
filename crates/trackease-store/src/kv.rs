//! # Key-Value Store
//!
//! The SQLite-backed key-value table underneath the collection API.
//!
//! ## Why SQLite for a Key-Value Store?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The persisted layout is key → JSON blob:                               │
//! │                                                                         │
//! │    businessInfo  │ {"businessName":"Kedai Siti", ...}                   │
//! │    products      │ [{"id":"1700...","name":"Teh Tarik", ...}, ...]      │
//! │    sales         │ [{"id":"1700...","items":[...], ...}, ...]           │
//! │    categories    │ ["Food","Drinks","Apparel","Other"]                  │
//! │    hasLaunched   │ "true"                                               │
//! │                                                                         │
//! │  Device key-value stores are themselves SQLite tables under the hood;   │
//! │  a single kv table gives us the same durability with one dependency     │
//! │  we already carry. No schema beyond (key, value), ever.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! WAL (Write-Ahead Logging) is enabled for better crash recovery; with a
//! single user the concurrency benefits are incidental.

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Configuration
// =============================================================================

/// Key-value store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/path/to/trackease.db").max_connections(2);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 2 (one user, one screen at a time)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,
}

impl StoreConfig {
    /// Creates a new store configuration with the given path.
    /// The file is created on open if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 2,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Creates an in-memory store configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let store = KvStore::open(StoreConfig::in_memory()).await?;
    /// // Store is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
        }
    }
}

// =============================================================================
// KvStore
// =============================================================================

/// Raw key-value access: JSON strings in, JSON strings out.
///
/// The typed collection API lives in [`crate::store::Store`]; this layer
/// knows nothing about what the blobs mean.
#[derive(Debug, Clone)]
pub struct KvStore {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl KvStore {
    /// Opens (and if needed creates) the store.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite: WAL journal, NORMAL synchronous
    /// 3. Creates the connection pool
    /// 4. Ensures the kv table exists
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening key-value store"
        );

        // sqlite://path with mode=rwc creates the file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
            // WAL mode: better crash recovery
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL synchronous: good balance of durability and speed
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        let store = KvStore { pool };
        store.ensure_schema().await?;

        info!("Key-value store ready");
        Ok(store)
    }

    /// Creates the kv table if it doesn't exist. Idempotent.
    async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Reads the raw JSON string stored under a key.
    ///
    /// ## Returns
    /// * `Ok(Some(json))` - key present
    /// * `Ok(None)` - key absent (a documented state, not an error)
    pub async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        debug!(key = %key, "kv get");
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM kv WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value)
    }

    /// Writes (inserts or overwrites) the raw JSON string under a key.
    pub async fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        debug!(key = %key, bytes = value.len(), "kv put");
        sqlx::query(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Removes a key. Removing an absent key is a no-op.
    pub async fn remove(&self, key: &str) -> StoreResult<()> {
        debug!(key = %key, "kv remove");
        sqlx::query("DELETE FROM kv WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Deletes every key (the full app reset).
    pub async fn clear(&self) -> StoreResult<()> {
        info!("Clearing key-value store");
        sqlx::query("DELETE FROM kv").execute(&self.pool).await?;
        Ok(())
    }

    /// Checks if the store is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes the connection pool.
    ///
    /// ## Note
    /// After calling close, all store operations will fail.
    pub async fn close(&self) {
        info!("Closing key-value store");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
