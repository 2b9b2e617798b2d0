//! # Error Types
//!
//! Domain-specific error types for trackease-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  trackease-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations (cart, checkout)       │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  trackease-store errors (separate crate)                                │
//! │  └── StoreError       - Key-value storage failures                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → shown to the user;                 │
//! │        StoreError is logged at the store boundary and swallowed.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, counts)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These map one-to-one to the alerts the screens show
/// ("Out of Stock", "Insufficient Stock", "Empty Cart", ...).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the loaded collection.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Sale cannot be found in the loaded collection.
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// Product has zero stock; it cannot be added to the cart at all.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// Adding the requested quantity would exceed available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Teh Tarik", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Screen shows: "Not enough stock available"
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements and are raised
/// before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g., non-numeric mobile number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Teh Tarik".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Teh Tarik: available 3, requested 5"
        );
        assert_eq!(
            CoreError::ProductNotFound("1700000000000".to_string()).to_string(),
            "Product not found: 1700000000000"
        );
        assert_eq!(
            CoreError::SaleNotFound("1700000000001".to_string()).to_string(),
            "Sale not found: 1700000000001"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
