//! # aurum-core: Pure Pricing Logic for Aurum
//!
//! This crate is the **heart** of Aurum. It turns a spot gold price, a purity
//! grade and a weight into sale prices, profits and buy-back amounts, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Aurum Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (CLI / browser frontend)              │   │
//! │  │    Sales form ──► Sales quote      Purchase form ──► Amount     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ aurum-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   sales   │  │ purchase  │  │ validation│  │   │
//! │  │   │  Purity   │  │  engine   │  │  engine   │  │   rules   │  │   │
//! │  │   │  Margins  │  │  quote    │  │  floor    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    aurum-db (Settings Store)                    │   │
//! │  │              gold price + margins in SQLite                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Purity grades, spot price, margins, discount policy
//! - [`settings`] - The immutable settings snapshot the engines read
//! - [`sales`] - Sale price / discount price / profit engine
//! - [`purchase`] - Buy-back amount engine
//! - [`money`] - `Won` and display formatting
//! - [`validation`] - Form text and numeric checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, bit-identical output
//! 2. **No I/O**: the settings snapshot is passed in, never looked up
//! 3. **No Partial Results**: a quote is either fully finite or an error
//! 4. **Explicit Errors**: blank, non-numeric, zero and negative are distinct
//!
//! ## Example Usage
//!
//! ```rust
//! use aurum_core::purchase::{quote_purchase_form, PurchaseForm};
//! use aurum_core::PurchasePurity;
//!
//! let form = PurchaseForm {
//!     purchase_price: "300000".to_string(),
//!     purity: PurchasePurity::K14,
//!     weight: "3.75".to_string(),
//! };
//!
//! let amount = quote_purchase_form(&form).unwrap();
//! assert_eq!(amount.to_string(), "165,000원");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod purchase;
pub mod sales;
pub mod settings;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Won;
pub use purchase::{compute_purchase_amount, quote_purchase_form, PurchaseCalculationInput, PurchaseForm};
pub use sales::{compute_sales_quote, quote_sales_form, SalesCalculationInput, SalesForm, SalesQuote};
pub use settings::PricingSettings;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Grams in one don, the unit spot and buy-back prices are quoted in.
pub const DON_GRAMS: f64 = 3.75;
