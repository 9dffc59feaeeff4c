//! # Error Types
//!
//! Domain-specific error types for aurum-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  aurum-core errors (this file)                                         │
//! │  ├── ValidationError  - Invalid Input (the only engine failure)        │
//! │  └── CoreError        - Validation + bad settings snapshots            │
//! │                                                                         │
//! │  aurum-db errors (separate crate)                                      │
//! │  └── DbError          - Settings store failures                        │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Terminal     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Blank vs Zero vs Negative
//! The engines never collapse these into one falsy check. A blank weight is
//! `Required`, `"abc"` is `NotANumber`, `0` and `-1` are `MustBePositive`.
//! The presentation layer may still render all of them as the same neutral
//! guidance state.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Invalid Input.
///
/// Every failure of the pricing engines is one of these variants. All of
/// them are recoverable: the caller shows a guidance state and waits for
/// the next input change.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field text does not parse as a number.
    #[error("{field} is not a number: '{value}'")]
    NotANumber { field: String, value: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Value (input or computed) is NaN or infinite.
    #[error("{field} is not a finite number")]
    NotFinite { field: String },

    /// Value is finite but too large to hold as whole won.
    #[error("{field} is out of range")]
    OutOfRange { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::MustBeNonNegative { field }
            | ValidationError::NotFinite { field }
            | ValidationError::OutOfRange { field }
            | ValidationError::NotAllowed { field, .. } => field,
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core errors outside of a single calculation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A settings snapshot cannot be used for pricing.
    ///
    /// ## When This Occurs
    /// - A margin percentage is NaN or infinite (corrupted stored data)
    /// - A spot price is negative
    /// - A discount policy parameter is not finite
    #[error("Invalid settings: {reason}")]
    InvalidSettings { reason: String },
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
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "weight".to_string(),
        };
        assert_eq!(err.to_string(), "weight is required");

        let err = ValidationError::NotANumber {
            field: "labor cost".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "labor cost is not a number: 'abc'");

        let err = ValidationError::MustBePositive {
            field: "spot price".to_string(),
        };
        assert_eq!(err.to_string(), "spot price must be positive");
    }

    #[test]
    fn test_field_accessor() {
        let err = ValidationError::NotFinite {
            field: "discount price".to_string(),
        };
        assert_eq!(err.field(), "discount price");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "weight".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_invalid_settings_message() {
        let err = CoreError::InvalidSettings {
            reason: "18K margin is not finite".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid settings: 18K margin is not finite");
    }
}
