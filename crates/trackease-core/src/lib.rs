//! # trackease-core: Pure Business Logic for TrackEase
//!
//! This crate is the **heart** of TrackEase. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       TrackEase Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    CLI "Screens" (apps/cli)                     │   │
//! │  │    Dashboard ──► Sell ──► Checkout ──► Receipt                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ trackease-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  reports  │   │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ summaries │   │   │
//! │  │   │   Sale    │  │ (cents)   │  │ CartItem  │  │ breakdowns│   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                trackease-store (Storage Layer)                  │   │
//! │  │        key → JSON blob collections in local SQLite              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (BusinessInfo, Product, Sale, PaymentMethod)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - In-memory cart with stock checks and checkout
//! - [`reports`] - Aggregations the screens re-derive on every focus
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in sen (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod reports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use trackease_core::Money` instead of
// `use trackease_core::money::Money`

pub use cart::{Cart, CartItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Categories seeded for a fresh business.
///
/// ## Why a constant?
/// The category list is a flat, editable list persisted under its own key.
/// When the key is absent the store falls back to this default set, the
/// same way a fresh install of the app behaves.
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Food", "Drinks", "Apparel", "Other"];

/// Default low-stock warning threshold.
///
/// A product with `0 < quantity <= threshold` is flagged as low stock.
/// Merchants can change this during onboarding or in settings.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Default message printed at the bottom of receipts.
pub const DEFAULT_RECEIPT_MESSAGE: &str = "Thank you for your purchase!";
