//! # Money Module
//!
//! Provides the `Won` type for whole-won amounts and the display helpers used
//! by every screen that shows a price.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ROUNDING RULES                                                         │
//! │                                                                         │
//! │  Sales engine:     f64 all the way through, NO rounding                │
//! │                    (only the two profit-rate percentages are rounded)  │
//! │                                                                         │
//! │  Purchase engine:  floor() to a whole Won, never rounds up              │
//! │                    the shop never overpays because of rounding          │
//! │                                                                         │
//! │  Display:          format_won() rounds to the nearest won               │
//! │                    the rounded string is never fed back into math      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use aurum_core::money::{format_won, Won};
//!
//! let amount = Won::floor_from(165_000.9).unwrap();
//! assert_eq!(amount.amount(), 165_000);
//! assert_eq!(amount.to_string(), "165,000원");
//!
//! assert_eq!(format_won(485_850.4), "485,850원");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::{ValidationResult, FIELD_AMOUNT};

/// Suffix appended to every displayed amount.
pub const CURRENCY_SUFFIX: &str = "원";

// =============================================================================
// Won Type
// =============================================================================

/// A whole-won amount. KRW has no minor unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic on differences stays in the type
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Won(i64);

impl Won {
    /// Creates an amount from whole won.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Won(amount)
    }

    /// Returns the amount in whole won.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Won(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Floors a computed amount to whole won.
    ///
    /// ## Rules
    /// - NaN / infinite values are rejected as `NotFinite`
    /// - Finite values outside the i64 range are rejected as `OutOfRange`
    /// - Fractions are always dropped toward negative infinity
    ///
    /// ## Example
    /// ```rust
    /// use aurum_core::money::Won;
    ///
    /// assert_eq!(Won::floor_from(99.999).unwrap().amount(), 99);
    /// assert!(Won::floor_from(f64::NAN).is_err());
    /// ```
    pub fn floor_from(value: f64) -> ValidationResult<Self> {
        Self::from_whole(value.floor())
    }

    /// Rounds a computed amount to the nearest won (half away from zero).
    ///
    /// For display only.
    pub fn round_from(value: f64) -> ValidationResult<Self> {
        Self::from_whole(value.round())
    }

    fn from_whole(whole: f64) -> ValidationResult<Self> {
        if !whole.is_finite() {
            return Err(ValidationError::NotFinite {
                field: FIELD_AMOUNT.to_string(),
            });
        }
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
        if whole >= i64::MAX as f64 || whole < i64::MIN as f64 {
            return Err(ValidationError::OutOfRange {
                field: FIELD_AMOUNT.to_string(),
            });
        }
        Ok(Won(whole as i64))
    }
}

// =============================================================================
// Display Helpers
// =============================================================================

/// Groups digits in threes, the way ko-KR number formatting does.
///
/// ## Example
/// ```rust
/// use aurum_core::money::group_digits;
///
/// assert_eq!(group_digits(1234567), "1,234,567");
/// assert_eq!(group_digits(-1000), "-1,000");
/// assert_eq!(group_digits(999), "999");
/// ```
pub fn group_digits(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// Formats a real-valued amount for display, rounded to the nearest won.
///
/// Non-finite values render as `0원` so a corrupted value never shows up as
/// `NaN` on screen.
pub fn format_won(value: f64) -> String {
    match Won::round_from(value) {
        Ok(won) => won.to_string(),
        Err(_) => Won::zero().to_string(),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Won {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", group_digits(self.0), CURRENCY_SUFFIX)
    }
}

impl Default for Won {
    fn default() -> Self {
        Won::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_from() {
        assert_eq!(Won::floor_from(165_000.0).unwrap().amount(), 165_000);
        assert_eq!(Won::floor_from(165_000.999).unwrap().amount(), 165_000);
        assert_eq!(Won::floor_from(0.4).unwrap().amount(), 0);
    }

    #[test]
    fn test_floor_rejects_non_finite() {
        assert!(Won::floor_from(f64::NAN).is_err());
        assert!(Won::floor_from(f64::INFINITY).is_err());
    }

    #[test]
    fn test_floor_rejects_out_of_range() {
        assert!(matches!(
            Won::floor_from(1e300),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            Won::floor_from(-1e300),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_round_from() {
        assert_eq!(Won::round_from(10.5).unwrap().amount(), 11);
        assert_eq!(Won::round_from(10.49).unwrap().amount(), 10);
    }

    #[test]
    fn test_display() {
        assert_eq!(Won::new(165_000).to_string(), "165,000원");
        assert_eq!(Won::new(0).to_string(), "0원");
        assert_eq!(Won::new(-1_500).to_string(), "-1,500원");
        assert_eq!(Won::new(1_234_567_890).to_string(), "1,234,567,890원");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(100), "100");
        assert_eq!(group_digits(1_000), "1,000");
        assert_eq!(group_digits(100_000), "100,000");
        assert_eq!(group_digits(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_format_won() {
        assert_eq!(format_won(485_850.0), "485,850원");
        assert_eq!(format_won(90_849.6), "90,850원");
        assert_eq!(format_won(f64::NAN), "0원");
    }
}
