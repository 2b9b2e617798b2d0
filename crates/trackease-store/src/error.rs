//! # Storage Error Types
//!
//! Error types for key-value store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite error (sqlx::Error) / JSON error (serde_json::Error)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds context and categorization             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store facade: tracing::error! + safe default                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller sees None / empty collection, never the error itself            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Key-value store operation errors.
///
/// These wrap sqlx and serde_json errors with a little context. They stay
/// internal to the store facade; the public collection API logs them and
/// returns defaults instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store file could not be opened or created.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A read or write against the kv table failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored blob could not be decoded, or a value could not be
    /// encoded, as JSON.
    ///
    /// ## When This Occurs
    /// - Hand-edited or corrupted database file
    /// - Schema drift between app versions
    #[error("JSON (de)serialization failed for key '{key}': {message}")]
    Serde { key: String, message: String },

    /// Internal store error.
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates a Serde error with the offending key for context.
    pub fn serde(key: impl Into<String>, err: serde_json::Error) -> Self {
        StoreError::Serde {
            key: key.into(),
            message: err.to_string(),
        }
    }
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::PoolTimedOut  → ConnectionFailed
/// sqlx::Error::PoolClosed    → ConnectionFailed
/// sqlx::Error::Database      → QueryFailed
/// Other                      → Internal
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                StoreError::ConnectionFailed("pool timed out".to_string())
            }
            sqlx::Error::PoolClosed => {
                StoreError::ConnectionFailed("pool is closed".to_string())
            }
            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.to_string()),
            other => StoreError::Internal(other.to_string()),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_error_includes_key() {
        let json_err = serde_json::from_str::<Vec<i64>>("not json").unwrap_err();
        let err = StoreError::serde("products", json_err);
        assert!(err.to_string().contains("products"));
    }
}
