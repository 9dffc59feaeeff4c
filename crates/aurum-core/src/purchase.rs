//! # Purchase Pricing
//!
//! Buy-back amount for 14K/18K gold brought in by a customer.
//!
//! ```text
//! amount = floor( weight / 3.75 × multiplier(purity) × buy-back price )
//!
//!   14K → 0.55        18K → 0.72
//! ```
//!
//! The amount is floored, never rounded: the shop never pays out a fraction
//! of a won it did not owe.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Won;
use crate::types::PurchasePurity;
use crate::validation::{
    ensure_positive, parse_positive, ValidationResult, FIELD_PURCHASE_PRICE, FIELD_WEIGHT,
};
use crate::DON_GRAMS;

/// Raw buy-back form as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseForm {
    /// Today's buy-back price per 3.75 g.
    pub purchase_price: String,
    pub purity: PurchasePurity,
    pub weight: String,
}

impl PurchaseForm {
    /// Parses the form, price first, then weight.
    pub fn parse(&self) -> ValidationResult<PurchaseCalculationInput> {
        Ok(PurchaseCalculationInput {
            price_per_don: parse_positive(FIELD_PURCHASE_PRICE, &self.purchase_price)?,
            purity: self.purity,
            weight_grams: parse_positive(FIELD_WEIGHT, &self.weight)?,
        })
    }
}

/// Checked buy-back input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseCalculationInput {
    pub price_per_don: f64,
    pub purity: PurchasePurity,
    pub weight_grams: f64,
}

/// Computes the buy-back amount.
///
/// ## Example
/// ```rust
/// use aurum_core::purchase::{compute_purchase_amount, PurchaseCalculationInput};
/// use aurum_core::PurchasePurity;
///
/// let input = PurchaseCalculationInput {
///     price_per_don: 300_000.0,
///     purity: PurchasePurity::K14,
///     weight_grams: 3.75,
/// };
/// assert_eq!(compute_purchase_amount(&input).unwrap().amount(), 165_000);
/// ```
pub fn compute_purchase_amount(input: &PurchaseCalculationInput) -> ValidationResult<Won> {
    let price = ensure_positive(FIELD_PURCHASE_PRICE, input.price_per_don)?;
    let weight = ensure_positive(FIELD_WEIGHT, input.weight_grams)?;

    let amount = (weight / DON_GRAMS) * input.purity.multiplier() * price;

    Won::floor_from(amount)
}

/// Parses the raw form and computes the buy-back amount.
pub fn quote_purchase_form(form: &PurchaseForm) -> ValidationResult<Won> {
    compute_purchase_amount(&form.parse()?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    fn input(price: f64, purity: PurchasePurity, weight: f64) -> PurchaseCalculationInput {
        PurchaseCalculationInput {
            price_per_don: price,
            purity,
            weight_grams: weight,
        }
    }

    #[test]
    fn test_one_don_of_14k() {
        let amount = compute_purchase_amount(&input(300_000.0, PurchasePurity::K14, 3.75)).unwrap();
        assert_eq!(amount, Won::new(165_000));
    }

    #[test]
    fn test_18k_multiplier() {
        let amount = compute_purchase_amount(&input(300_000.0, PurchasePurity::K18, 3.75)).unwrap();
        assert_eq!(amount.amount(), 216_000);
    }

    #[test]
    fn test_fraction_is_floored() {
        // 1 / 3.75 × 0.55 × 100,000 = 14,666.66…
        let amount = compute_purchase_amount(&input(100_000.0, PurchasePurity::K14, 1.0)).unwrap();
        assert_eq!(amount.amount(), 14_666);
    }

    #[test]
    fn test_tiny_amount_floors_to_zero() {
        let amount = compute_purchase_amount(&input(1.0, PurchasePurity::K14, 0.001)).unwrap();
        assert!(amount.is_zero());
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        for (price, weight) in [(0.0, 3.75), (-1.0, 3.75), (300_000.0, 0.0), (300_000.0, -3.75)] {
            assert!(matches!(
                compute_purchase_amount(&input(price, PurchasePurity::K18, weight)),
                Err(ValidationError::MustBePositive { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_overflowing_amount() {
        let err = compute_purchase_amount(&input(f64::MAX, PurchasePurity::K18, f64::MAX)).unwrap_err();
        assert!(matches!(err, ValidationError::NotFinite { .. }));
    }

    #[test]
    fn test_rejects_amount_beyond_whole_won_range() {
        let err = compute_purchase_amount(&input(1e300, PurchasePurity::K18, 3.75)).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
        assert_eq!(err.field(), "amount");
    }

    #[test]
    fn test_form_blank_and_text() {
        let form = PurchaseForm {
            purchase_price: "300000".to_string(),
            purity: PurchasePurity::K14,
            weight: "".to_string(),
        };
        assert!(matches!(
            quote_purchase_form(&form),
            Err(ValidationError::Required { .. })
        ));

        let form = PurchaseForm {
            purchase_price: "lots".to_string(),
            ..form
        };
        let err = quote_purchase_form(&form).unwrap_err();
        assert_eq!(err.field(), FIELD_PURCHASE_PRICE);
    }

    #[test]
    fn test_form_happy_path() {
        let form = PurchaseForm {
            purchase_price: " 300000 ".to_string(),
            purity: PurchasePurity::K14,
            weight: "3.75".to_string(),
        };
        assert_eq!(quote_purchase_form(&form).unwrap().amount(), 165_000);
    }
}
