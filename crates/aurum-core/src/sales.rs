//! # Sales Pricing
//!
//! Sale price, discount price and profit for a piece of 14K/18K/24K jewelry.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  spot (per 3.75 g) × weight / 3.75 × purity ratio   = gold value        │
//! │                                   + labor cost      = base cost         │
//! │                                                                         │
//! │  base cost × (1 + margin / 100)                     = regular price     │
//! │  base cost × (1 + policy markup / 100)              = discount price    │
//! │                                                                         │
//! │  price - base cost                                  = profit            │
//! │  round(profit / price × 100)                        = profit rate (%)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use aurum_core::sales::{compute_sales_quote, SalesCalculationInput};
//! use aurum_core::{MarginConfig, PriceBasis, PricingSettings, Purity, SpotPrice};
//!
//! let settings = PricingSettings::new(
//!     SpotPrice::new(350_000.0, 340_000.0),
//!     MarginConfig::default(),
//! );
//! let input = SalesCalculationInput {
//!     purity: Purity::K18,
//!     weight_grams: 5.0,
//!     labor_cost: 10_000.0,
//!     price_basis: PriceBasis::Vat,
//! };
//!
//! let quote = compute_sales_quote(&input, &settings).unwrap();
//! assert!((quote.base_cost - 395_000.0).abs() < 1e-6);
//! assert_eq!(quote.regular_profit_rate, 19);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::settings::PricingSettings;
use crate::types::{PriceBasis, Purity};
use crate::validation::{
    ensure_finite, ensure_non_negative, ensure_positive, parse_optional_non_negative,
    parse_positive, ValidationResult, FIELD_LABOR_COST, FIELD_SPOT_PRICE, FIELD_WEIGHT,
};
use crate::DON_GRAMS;

// =============================================================================
// Input
// =============================================================================

/// Raw sale form as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesForm {
    pub purity: Purity,
    pub weight: String,
    pub labor_cost: Option<String>,
    pub price_basis: PriceBasis,
}

/// Checked sale input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesCalculationInput {
    pub purity: Purity,
    pub weight_grams: f64,
    pub labor_cost: f64,
    pub price_basis: PriceBasis,
}

// =============================================================================
// Result
// =============================================================================

/// Everything the sales screen shows. All money fields are unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesQuote {
    pub purity: Purity,
    pub price_basis: PriceBasis,
    /// Spot price that was used (per 3.75 g).
    pub spot_price: f64,
    pub margin_percent: f64,
    pub gold_value: f64,
    pub base_cost: f64,
    pub regular_price: f64,
    pub discount_price: f64,
    pub regular_profit: f64,
    pub discount_profit: f64,
    /// Whole percent, rounded half up.
    pub regular_profit_rate: i64,
    /// Whole percent, rounded half up.
    pub discount_profit_rate: i64,
}

// =============================================================================
// Engine
// =============================================================================

/// Prices a sale against the current settings snapshot.
///
/// ## Validation Order
/// 1. weight finite and > 0
/// 2. spot price for the chosen basis finite and > 0
/// 3. labor cost finite and >= 0
///
/// The first failure is returned; nothing is computed. If corrupted margins
/// push any field to NaN/infinity the whole quote is rejected.
pub fn compute_sales_quote(
    input: &SalesCalculationInput,
    settings: &PricingSettings,
) -> ValidationResult<SalesQuote> {
    let weight = ensure_positive(FIELD_WEIGHT, input.weight_grams)?;
    let spot = ensure_positive(FIELD_SPOT_PRICE, settings.spot.price_for(input.price_basis))?;
    let labor = ensure_non_negative(FIELD_LABOR_COST, input.labor_cost)?;

    let margins = &settings.margins;
    let margin = margins.margin_for(input.purity);

    let gold_value = spot * (weight / DON_GRAMS) * input.purity.sales_ratio();
    let base_cost = gold_value + labor;
    let regular_price = base_cost * (1.0 + margin / 100.0);
    let discount_markup = margins.discount.effective_markup_percent(margin);
    let discount_price = base_cost * (1.0 + discount_markup / 100.0);
    let regular_profit = regular_price - base_cost;
    let discount_profit = discount_price - base_cost;

    Ok(SalesQuote {
        purity: input.purity,
        price_basis: input.price_basis,
        spot_price: spot,
        margin_percent: ensure_finite("margin", margin)?,
        gold_value: ensure_finite("gold value", gold_value)?,
        base_cost: ensure_finite("base cost", base_cost)?,
        regular_price: ensure_finite("regular price", regular_price)?,
        discount_price: ensure_finite("discount price", discount_price)?,
        regular_profit: ensure_finite("regular profit", regular_profit)?,
        discount_profit: ensure_finite("discount profit", discount_profit)?,
        regular_profit_rate: profit_rate(regular_profit, regular_price),
        discount_profit_rate: profit_rate(discount_profit, discount_price),
    })
}

/// Parses the raw form and prices it, keeping the validation order of
/// [`compute_sales_quote`].
pub fn quote_sales_form(form: &SalesForm, settings: &PricingSettings) -> ValidationResult<SalesQuote> {
    let weight_grams = parse_positive(FIELD_WEIGHT, &form.weight)?;
    ensure_positive(FIELD_SPOT_PRICE, settings.spot.price_for(form.price_basis))?;
    let labor_cost = parse_optional_non_negative(FIELD_LABOR_COST, form.labor_cost.as_deref())?;

    let input = SalesCalculationInput {
        purity: form.purity,
        weight_grams,
        labor_cost,
        price_basis: form.price_basis,
    };

    compute_sales_quote(&input, settings)
}

/// Profit as a whole percent of the price, rounded half up. Zero when the
/// price is not positive.
fn profit_rate(profit: f64, price: f64) -> i64 {
    if price > 0.0 {
        // both inputs are finite here, so the ratio is too
        (profit / price * 100.0 + 0.5).floor() as i64
    } else {
        0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiscountPolicy, MarginConfig, SpotPrice};
    use crate::ValidationError;

    const EPS: f64 = 1e-6;

    fn settings() -> PricingSettings {
        PricingSettings::new(
            SpotPrice::new(350_000.0, 340_000.0),
            MarginConfig::default(),
        )
    }

    fn input(purity: Purity, weight_grams: f64, labor_cost: f64) -> SalesCalculationInput {
        SalesCalculationInput {
            purity,
            weight_grams,
            labor_cost,
            price_basis: PriceBasis::Vat,
        }
    }

    #[test]
    fn test_scenario_18k_five_grams() {
        let quote = compute_sales_quote(&input(Purity::K18, 5.0, 10_000.0), &settings()).unwrap();

        assert!((quote.gold_value - 385_000.0).abs() < EPS);
        assert!((quote.base_cost - 395_000.0).abs() < EPS);
        assert!((quote.regular_price - 485_850.0).abs() < EPS);
        assert!((quote.regular_profit - 90_850.0).abs() < EPS);
        assert_eq!(quote.regular_profit_rate, 19);
        assert_eq!(quote.margin_percent, 23.0);
    }

    #[test]
    fn test_margin_point_reduction_discount() {
        // 23% margin - 3 points = 20% over cost
        let quote = compute_sales_quote(&input(Purity::K18, 5.0, 10_000.0), &settings()).unwrap();

        assert!((quote.discount_price - 474_000.0).abs() < EPS);
        assert!((quote.discount_profit - 79_000.0).abs() < EPS);
        assert_eq!(quote.discount_profit_rate, 17);
    }

    #[test]
    fn test_rate_on_regular_price_discount() {
        let margins = MarginConfig::default()
            .with_discount(DiscountPolicy::RateOnRegularPrice { rate_percent: 3.0 });
        let settings = settings().with_margins(margins);

        let quote = compute_sales_quote(&input(Purity::K18, 5.0, 10_000.0), &settings).unwrap();

        // 485,850 × 0.97
        assert!((quote.discount_price - 471_274.5).abs() < EPS);
        assert!((quote.discount_profit - 76_274.5).abs() < EPS);
        assert_eq!(quote.discount_profit_rate, 16);
    }

    #[test]
    fn test_purity_ratios_drive_gold_value() {
        let s = settings();
        let k14 = compute_sales_quote(&input(Purity::K14, 3.75, 0.0), &s).unwrap();
        let k24 = compute_sales_quote(&input(Purity::K24, 3.75, 0.0), &s).unwrap();

        assert!((k14.gold_value - 350_000.0 * 0.6435).abs() < EPS);
        assert!((k24.gold_value - 350_000.0).abs() < EPS);
    }

    #[test]
    fn test_cash_basis_uses_cash_price() {
        let mut cash = input(Purity::K24, 3.75, 0.0);
        cash.price_basis = PriceBasis::Cash;

        let quote = compute_sales_quote(&cash, &settings()).unwrap();
        assert_eq!(quote.spot_price, 340_000.0);
        assert!((quote.gold_value - 340_000.0).abs() < EPS);
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        for weight in [0.0, -1.0] {
            assert!(matches!(
                compute_sales_quote(&input(Purity::K18, weight, 0.0), &settings()),
                Err(ValidationError::MustBePositive { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_unset_spot_price() {
        let unset = settings().with_spot(SpotPrice::default());
        let err = compute_sales_quote(&input(Purity::K18, 5.0, 0.0), &unset).unwrap_err();
        assert_eq!(err.field(), FIELD_SPOT_PRICE);
    }

    #[test]
    fn test_rejects_negative_spot_price_on_either_basis() {
        let negative = settings().with_spot(SpotPrice::new(-350_000.0, -320_000.0));

        for price_basis in [PriceBasis::Vat, PriceBasis::Cash] {
            let quote_input = SalesCalculationInput {
                price_basis,
                ..input(Purity::K18, 5.0, 0.0)
            };
            let err = compute_sales_quote(&quote_input, &negative).unwrap_err();
            assert!(matches!(err, ValidationError::MustBePositive { .. }));
            assert_eq!(err.field(), FIELD_SPOT_PRICE);
        }

        // Only the chosen basis is checked.
        let cash_only = settings().with_spot(SpotPrice::new(-1.0, 320_000.0));
        let cash_input = SalesCalculationInput {
            price_basis: PriceBasis::Cash,
            ..input(Purity::K18, 5.0, 0.0)
        };
        assert!(compute_sales_quote(&cash_input, &cash_only).is_ok());
    }

    #[test]
    fn test_rejects_negative_labor() {
        assert!(matches!(
            compute_sales_quote(&input(Purity::K18, 5.0, -1.0), &settings()),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
    }

    #[test]
    fn test_corrupted_margin_is_invalid() {
        let corrupted = settings().with_margins(MarginConfig::default().with_margin(Purity::K18, f64::NAN));
        assert!(matches!(
            compute_sales_quote(&input(Purity::K18, 5.0, 0.0), &corrupted),
            Err(ValidationError::NotFinite { .. })
        ));

        let overflowing = settings().with_margins(MarginConfig::default().with_margin(Purity::K18, f64::MAX));
        assert!(compute_sales_quote(&input(Purity::K18, 5.0, 0.0), &overflowing).is_err());
    }

    #[test]
    fn test_zero_price_gives_zero_rate() {
        // -100% margin zeroes the regular price
        let margins = MarginConfig::default().with_margin(Purity::K18, -100.0);
        let quote = compute_sales_quote(&input(Purity::K18, 5.0, 0.0), &settings().with_margins(margins)).unwrap();

        assert_eq!(quote.regular_price, 0.0);
        assert_eq!(quote.regular_profit_rate, 0);
    }

    #[test]
    fn test_profit_rate_rounds_half_up() {
        assert_eq!(profit_rate(1.0, 8.0), 13); // 12.5%
        assert_eq!(profit_rate(3.0, 8.0), 38); // 37.5%
        assert_eq!(profit_rate(184.9, 1000.0), 18);
        assert_eq!(profit_rate(1.0, 0.0), 0);
        assert_eq!(profit_rate(1.0, -5.0), 0);
    }

    #[test]
    fn test_idempotent() {
        let s = settings();
        let i = input(Purity::K14, 7.31, 12_345.0);
        let a = compute_sales_quote(&i, &s).unwrap();
        let b = compute_sales_quote(&i, &s).unwrap();

        assert_eq!(a.regular_price.to_bits(), b.regular_price.to_bits());
        assert_eq!(a.discount_price.to_bits(), b.discount_price.to_bits());
        assert_eq!(a, b);
    }

    // -------------------------------------------------------------------------
    // Form entry point
    // -------------------------------------------------------------------------

    fn form(weight: &str, labor: Option<&str>) -> SalesForm {
        SalesForm {
            purity: Purity::K18,
            weight: weight.to_string(),
            labor_cost: labor.map(str::to_string),
            price_basis: PriceBasis::Vat,
        }
    }

    #[test]
    fn test_form_blank_weight_is_invalid() {
        assert!(matches!(
            quote_sales_form(&form("", Some("10000")), &settings()),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_form_non_numeric_weight_is_invalid() {
        assert!(matches!(
            quote_sales_form(&form("five", None), &settings()),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_form_blank_labor_is_zero() {
        let quote = quote_sales_form(&form("5", Some("")), &settings()).unwrap();
        assert!((quote.base_cost - 385_000.0).abs() < EPS);

        let quote = quote_sales_form(&form("5", Some("n/a")), &settings()).unwrap();
        assert!((quote.base_cost - 385_000.0).abs() < EPS);
    }

    #[test]
    fn test_form_spot_checked_before_labor() {
        let unset = settings().with_spot(SpotPrice::default());
        let err = quote_sales_form(&form("5", Some("-1")), &unset).unwrap_err();
        assert_eq!(err.field(), FIELD_SPOT_PRICE);
    }

    #[test]
    fn test_form_uses_selected_purity() {
        let mut f = form("3.75", None);
        f.purity = Purity::K24;
        let quote = quote_sales_form(&f, &settings()).unwrap();
        assert_eq!(quote.purity, Purity::K24);
        assert!((quote.gold_value - 350_000.0).abs() < EPS);
    }
}
