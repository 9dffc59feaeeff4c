//! # Purchase Commands
//!
//! Buy-back calculator. Needs no stored settings: the buy-back price is
//! typed in for each calculation.

use aurum_core::money::group_digits;
use aurum_core::{compute_purchase_amount, PurchaseForm, PurchasePurity, Won, DON_GRAMS};
use serde::Serialize;
use tracing::debug;

use super::CalculatorOutcome;

/// A computed buy-back amount with the figures it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseQuote {
    pub price_per_don: f64,
    pub purity: PurchasePurity,
    pub weight_grams: f64,
    pub multiplier: f64,
    pub amount: Won,
}

/// Computes the buy-back amount for a raw form.
pub fn quote_purchase(form: &PurchaseForm) -> CalculatorOutcome<PurchaseQuote> {
    debug!(purity = %form.purity, "quote_purchase command");

    let quote = form.parse().and_then(|input| {
        compute_purchase_amount(&input).map(|amount| PurchaseQuote {
            price_per_don: input.price_per_don,
            purity: input.purity,
            weight_grams: input.weight_grams,
            multiplier: input.purity.multiplier(),
            amount,
        })
    });

    CalculatorOutcome::from_result(quote)
}

/// Renders the outcome as terminal text.
///
/// ```text
/// Purchase amount (14K, 3.75 g): 165,000원
/// 계산: (3.75 ÷ 3.75) × 0.55 × 300,000 = 165,000원
/// ```
pub fn render_purchase(outcome: &CalculatorOutcome<PurchaseQuote>) -> String {
    match outcome {
        CalculatorOutcome::Calculated { result } => format!(
            "Purchase amount ({}, {} g): {}\n계산: ({} ÷ {}) × {} × {} = {}",
            result.purity,
            result.weight_grams,
            result.amount,
            result.weight_grams,
            DON_GRAMS,
            result.multiplier,
            group_digits(result.price_per_don.round() as i64),
            result.amount
        ),
        CalculatorOutcome::NeedsInput { guidance } => {
            format!("{} ({})", guidance.message, guidance.reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(price: &str, purity: PurchasePurity, weight: &str) -> PurchaseForm {
        PurchaseForm {
            purchase_price: price.to_string(),
            purity,
            weight: weight.to_string(),
        }
    }

    #[test]
    fn test_quote_and_render() {
        let outcome = quote_purchase(&form("300000", PurchasePurity::K14, "3.75"));

        let quote = outcome.result().unwrap();
        assert_eq!(quote.amount, Won::new(165_000));
        assert_eq!(quote.multiplier, 0.55);
        assert_eq!(
            render_purchase(&outcome),
            "Purchase amount (14K, 3.75 g): 165,000원\n계산: (3.75 ÷ 3.75) × 0.55 × 300,000 = 165,000원"
        );
    }

    #[test]
    fn test_breakdown_for_18k() {
        let outcome = quote_purchase(&form("300000", PurchasePurity::K18, "3.75"));

        let text = render_purchase(&outcome);
        assert!(text.ends_with("계산: (3.75 ÷ 3.75) × 0.72 × 300,000 = 216,000원"));
    }

    #[test]
    fn test_large_amount_is_grouped_from_whole_won() {
        // 9,007,199,254,740,993 is not representable as f64; the whole-won
        // value must be printed, not a re-rounded float.
        let quote = PurchaseQuote {
            price_per_don: 1.0,
            purity: PurchasePurity::K14,
            weight_grams: 3.75,
            multiplier: 0.55,
            amount: Won::new(9_007_199_254_740_993),
        };
        let text = render_purchase(&CalculatorOutcome::Calculated { result: quote });
        assert!(text.starts_with("Purchase amount (14K, 3.75 g): 9,007,199,254,740,993원"));
    }

    #[test]
    fn test_json_shape() {
        let outcome = quote_purchase(&form("300000", PurchasePurity::K14, "3.75"));
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["status"], "calculated");
        assert_eq!(json["result"]["amount"], 165_000);
        assert_eq!(json["result"]["pricePerDon"], 300_000.0);
    }

    #[test]
    fn test_blank_weight_shows_guidance() {
        let outcome = quote_purchase(&form("300000", PurchasePurity::K18, ""));

        assert!(outcome.result().is_none());
        assert!(render_purchase(&outcome).starts_with("Enter values to see a result."));
    }
}
