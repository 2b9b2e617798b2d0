//! # trackease-store: Storage Access Layer for TrackEase
//!
//! This crate provides persistence for the TrackEase system: a local
//! key-value store whose values are whole JSON collections, backed by a
//! single SQLite table.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       TrackEase Data Flow                               │
//! │                                                                         │
//! │  CLI command (sell, inventory, report, ...)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 trackease-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐         ┌────────────────────────────────┐ │   │
//! │  │   │   KvStore     │         │            Store               │ │   │
//! │  │   │   (kv.rs)     │◄────────│          (store.rs)            │ │   │
//! │  │   │               │         │                                │ │   │
//! │  │   │ get/put/      │         │ business_info / products /     │ │   │
//! │  │   │ remove/clear  │         │ sales / categories accessors,  │ │   │
//! │  │   │ JSON strings  │         │ compound mutations             │ │   │
//! │  │   └───────────────┘         └────────────────────────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SQLite: kv(key TEXT PRIMARY KEY, value TEXT)                   │   │
//! │  │  businessInfo │ products │ sales │ categories │ hasLaunched     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Contract
//!
//! Every mutation reads the entire collection, mutates it in memory, and
//! writes it back - last writer wins, no locking. This is appropriate for
//! a single-user device and deliberately not made any cleverer.
//!
//! Storage failures never escape this crate's public collection API: they
//! are logged and converted to a safe default (`None`, empty vec, `false`).
//! Callers treat a default-looking result from a mutation as "operation
//! did not happen".
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trackease_store::{Store, StoreConfig};
//!
//! let store = Store::open(StoreConfig::new("trackease.db")).await?;
//! let products = store.products().await;            // [] on miss or error
//! let added = store.add_product(new_product).await; // None if it failed
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use kv::{KvStore, StoreConfig};
pub use store::Store;
