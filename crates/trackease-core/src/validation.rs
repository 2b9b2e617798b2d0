//! # Validation Module
//!
//! Input validation for TrackEase.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Argument parsing (clap)                                       │
//! │  ├── Type validation (numbers, dates, enums)                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                        │
//! │  ├── Required fields, ranges                                            │
//! │  └── Required fields become the alerts the screens show                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Storage layer                                                 │
//! │  └── None - the kv store persists whatever it is given (best-effort     │
//! │      invariants only, per the single-user model)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a category name.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    let category = category.trim();

    if category.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if category.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: 50,
        });
    }

    Ok(())
}

/// Validates a mobile number.
///
/// ## Rules
/// - Must not be empty
/// - Digits, spaces, `+` and `-` only (loose on purpose; onboarding
///   accepts whatever the merchant writes on their signage)
pub fn validate_mobile_number(mobile: &str) -> ValidationResult<()> {
    let mobile = mobile.trim();

    if mobile.is_empty() {
        return Err(ValidationError::Required {
            field: "mobile number".to_string(),
        });
    }

    if !mobile
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
    {
        return Err(ValidationError::InvalidFormat {
            field: "mobile number".to_string(),
            reason: "must contain only digits, spaces, '+' and '-'".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents. Zero is allowed (free samples happen);
/// negative prices are not.
pub fn validate_price_cents(price_cents: i64) -> ValidationResult<()> {
    if price_cents < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a stock quantity. Zero means out of stock and is valid.
pub fn validate_stock_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a stock adjustment amount (must be strictly positive).
pub fn validate_adjustment(amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "adjustment".to_string(),
        });
    }
    Ok(())
}

/// Validates the low-stock threshold.
pub fn validate_low_stock_threshold(threshold: i64) -> ValidationResult<()> {
    if threshold <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "low stock threshold".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_name() {
        assert!(validate_product_name("Teh Tarik").is_ok());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"a".repeat(201)).is_err());
    }

    #[test]
    fn test_mobile_number() {
        assert!(validate_mobile_number("+60 12-345 6789").is_ok());
        assert!(validate_mobile_number("").is_err());
        assert!(validate_mobile_number("call me").is_err());
    }

    #[test]
    fn test_price_and_quantity() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(-1).is_err());
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(-5).is_err());
    }

    #[test]
    fn test_adjustment_must_be_positive() {
        assert!(validate_adjustment(3).is_ok());
        assert!(validate_adjustment(0).is_err());
        assert!(validate_adjustment(-2).is_err());
    }

    #[test]
    fn test_threshold() {
        assert!(validate_low_stock_threshold(10).is_ok());
        assert!(validate_low_stock_threshold(0).is_err());
    }
}
