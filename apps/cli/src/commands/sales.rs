//! # Sales Commands
//!
//! Sale price calculator over the live settings snapshot.
//!
//! ## Output
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  18K, VAT price 350,000원 per 3.75 g, margin 23%                        │
//! │                                                                         │
//! │  Gold value        385,000원                                            │
//! │  Base cost         395,000원                                            │
//! │  Regular price     485,850원   profit 90,850원 (19%)                    │
//! │  Discount price    474,000원   profit 79,000원 (17%)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use aurum_core::money::format_won;
use aurum_core::{quote_sales_form, PriceBasis, SalesForm, SalesQuote};
use tracing::debug;

use super::CalculatorOutcome;
use crate::state::SettingsState;

/// Prices a raw sale form against the current snapshot.
pub fn quote_sales(settings: &SettingsState, form: &SalesForm) -> CalculatorOutcome<SalesQuote> {
    debug!(purity = %form.purity, basis = %form.price_basis, "quote_sales command");

    let snapshot = settings.snapshot();
    CalculatorOutcome::from_result(quote_sales_form(form, &snapshot))
}

/// Renders the outcome as terminal text.
pub fn render_sales(outcome: &CalculatorOutcome<SalesQuote>) -> String {
    let quote = match outcome {
        CalculatorOutcome::Calculated { result } => result,
        CalculatorOutcome::NeedsInput { guidance } => {
            return format!("{} ({})", guidance.message, guidance.reason);
        }
    };

    let basis = match quote.price_basis {
        PriceBasis::Vat => "VAT price",
        PriceBasis::Cash => "Cash price",
    };

    let mut lines = Vec::with_capacity(6);
    lines.push(format!(
        "{}, {} {} per 3.75 g, margin {}%",
        quote.purity,
        basis,
        format_won(quote.spot_price),
        quote.margin_percent
    ));
    lines.push(String::new());
    lines.push(format!("{:<16}{}", "Gold value", format_won(quote.gold_value)));
    lines.push(format!("{:<16}{}", "Base cost", format_won(quote.base_cost)));
    lines.push(format!(
        "{:<16}{}   profit {} ({}%)",
        "Regular price",
        format_won(quote.regular_price),
        format_won(quote.regular_profit),
        quote.regular_profit_rate
    ));
    lines.push(format!(
        "{:<16}{}   profit {} ({}%)",
        "Discount price",
        format_won(quote.discount_price),
        format_won(quote.discount_profit),
        quote.discount_profit_rate
    ));

    lines.join("\n")
}
