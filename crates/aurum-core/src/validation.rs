//! # Validation Module
//!
//! Turns raw form text into checked numbers for the pricing engines.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form text (SalesForm / PurchaseForm)                         │
//! │  ├── blank?          → Required                                        │
//! │  ├── not a number?   → NotANumber                                      │
//! │  └── NaN / inf?      → NotFinite                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Typed input (THIS MODULE's ensure_* checks)                  │
//! │  ├── weight, spot, buy-back price > 0   → MustBePositive               │
//! │  └── labor cost >= 0                     → MustBeNonNegative           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Result postcondition                                         │
//! │  └── every computed field finite         → NotFinite                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use aurum_core::validation::{parse_positive, FIELD_WEIGHT};
//!
//! assert_eq!(parse_positive(FIELD_WEIGHT, " 5.5 ").unwrap(), 5.5);
//! assert!(parse_positive(FIELD_WEIGHT, "").is_err());
//! assert!(parse_positive(FIELD_WEIGHT, "0").is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Names
// =============================================================================

pub const FIELD_WEIGHT: &str = "weight";
pub const FIELD_SPOT_PRICE: &str = "spot price";
pub const FIELD_LABOR_COST: &str = "labor cost";
pub const FIELD_PURCHASE_PRICE: &str = "purchase price";
pub const FIELD_PURITY: &str = "purity";
pub const FIELD_PRICE_BASIS: &str = "price basis";
pub const FIELD_AMOUNT: &str = "amount";

// =============================================================================
// Text Parsers
// =============================================================================

/// Parses a required numeric field.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Blank text is `Required`
/// - Text that is not a number is `NotANumber`
/// - `NaN` / `inf` parse but are rejected as `NotFinite`
pub fn parse_required_number(field: &str, text: &str) -> ValidationResult<f64> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let value = text
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber {
            field: field.to_string(),
            value: text.to_string(),
        })?;

    ensure_finite(field, value)
}

/// Parses a required field that must be strictly positive.
///
/// ## Example
/// ```rust
/// use aurum_core::validation::parse_positive;
///
/// assert!(parse_positive("weight", "3.75").is_ok());
/// assert!(parse_positive("weight", "-1").is_err());
/// assert!(parse_positive("weight", "abc").is_err());
/// ```
pub fn parse_positive(field: &str, text: &str) -> ValidationResult<f64> {
    let value = parse_required_number(field, text)?;
    ensure_positive(field, value)
}

/// Parses an optional field that defaults to zero.
///
/// ## Rules
/// - Absent, blank or unparseable text is treated as `0`
/// - A parsed value must be finite and `>= 0`
///
/// Labor cost is the only field with this leniency: a jeweller who has not
/// typed a labor cost yet still gets a quote.
pub fn parse_optional_non_negative(field: &str, text: Option<&str>) -> ValidationResult<f64> {
    let text = match text.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Ok(0.0),
    };

    match text.parse::<f64>() {
        Ok(value) => ensure_non_negative(field, value),
        Err(_) => Ok(0.0),
    }
}

// =============================================================================
// Numeric Checks
// =============================================================================

/// Rejects NaN and infinities.
pub fn ensure_finite(field: &str, value: f64) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    Ok(value)
}

/// Requires a finite value greater than zero.
///
/// ## Rules
/// - Must be finite
/// - Must be positive (> 0); zero means "unset" for spot prices
pub fn ensure_positive(field: &str, value: f64) -> ValidationResult<f64> {
    let value = ensure_finite(field, value)?;

    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(value)
}

/// Requires a finite value of zero or more.
pub fn ensure_non_negative(field: &str, value: f64) -> ValidationResult<f64> {
    let value = ensure_finite(field, value)?;

    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(value)
}

// =============================================================================
// Unit Tests
// =============================================================================
