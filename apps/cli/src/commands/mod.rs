//! # Commands Module
//!
//! Everything the `aurum` subcommands do, minus argument parsing.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (shared calculator outcome)
//! ├── sales.rs     ◄─── Sale price / discount price / profit
//! ├── purchase.rs  ◄─── Buy-back amount
//! └── settings.rs  ◄─── Show / edit gold price and margins
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  clap args ──► command fn(&State..., input) ──► response (Serialize)   │
//! │                                                    │                    │
//! │                                  ┌─────────────────┴──────────┐         │
//! │                                  ▼                            ▼         │
//! │                         render_*(...)                  serde_json       │
//! │                            (text output)              (--json output)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command declares only the state it needs: `purchase` needs none,
//! `sales` reads `SettingsState`, `settings` edits go through `DbState` and
//! then publish to `SettingsState`.

pub mod purchase;
pub mod sales;
pub mod settings;

use aurum_core::ValidationError;
use serde::Serialize;

/// Neutral message shown while the calculator form is incomplete or invalid.
pub const GUIDANCE_MESSAGE: &str = "Enter values to see a result.";

/// What a calculator shows instead of a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Guidance {
    pub message: String,
    /// Field that stopped the calculation.
    pub field: String,
    pub reason: String,
}

impl From<&ValidationError> for Guidance {
    fn from(err: &ValidationError) -> Self {
        Guidance {
            message: GUIDANCE_MESSAGE.to_string(),
            field: err.field().to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result of a calculator command: a value, or a guidance state.
///
/// Invalid input is an expected state of a live form, not a failure, so it
/// is never turned into an `ApiError`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalculatorOutcome<T> {
    Calculated { result: T },
    NeedsInput { guidance: Guidance },
}

impl<T> CalculatorOutcome<T> {
    /// Wraps an engine result, logging why input was rejected.
    pub fn from_result(result: Result<T, ValidationError>) -> Self {
        match result {
            Ok(result) => CalculatorOutcome::Calculated { result },
            Err(err) => {
                tracing::debug!(field = %err.field(), error = %err, "Calculator input rejected");
                CalculatorOutcome::NeedsInput {
                    guidance: Guidance::from(&err),
                }
            }
        }
    }

    /// Returns the calculated value, if any.
    pub fn result(&self) -> Option<&T> {
        match self {
            CalculatorOutcome::Calculated { result } => Some(result),
            CalculatorOutcome::NeedsInput { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_becomes_guidance() {
        let outcome: CalculatorOutcome<f64> = CalculatorOutcome::from_result(Err(
            ValidationError::MustBePositive {
                field: "weight".to_string(),
            },
        ));

        assert_eq!(outcome.result(), None);
        match outcome {
            CalculatorOutcome::NeedsInput { guidance } => {
                assert_eq!(guidance.message, GUIDANCE_MESSAGE);
                assert_eq!(guidance.field, "weight");
            }
            CalculatorOutcome::Calculated { .. } => panic!("expected guidance"),
        }
    }

    #[test]
    fn test_json_shape() {
        let outcome: CalculatorOutcome<i64> = CalculatorOutcome::from_result(Ok(165_000));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "calculated");
        assert_eq!(json["result"], 165_000);
    }
}
