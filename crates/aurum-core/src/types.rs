//! # Domain Types
//!
//! Value records used throughout Aurum. None of them has identity beyond its
//! fields; a new record is built for every recomputation.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Purity      │   │   SpotPrice     │   │  MarginConfig   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  14K  → 0.6435  │   │  vat_inclusive  │   │  k14 / k18 /k24 │       │
//! │  │  18K  → 0.825   │   │  cash           │   │  discount       │       │
//! │  │  24K  → 1.0     │   │  last_updated   │   │  (policy)       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PurchasePurity  │   │   PriceBasis    │   │ DiscountPolicy  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  14K  → 0.55    │   │  Vat            │   │  MarginPoint-   │       │
//! │  │  18K  → 0.72    │   │  Cash           │   │   Reduction     │       │
//! │  └─────────────────┘   └─────────────────┘   │  RateOnRegular- │       │
//! │                                              │   Price         │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Prices Per Don
//! Spot and buy-back prices are quoted per don (3.75 g), the traditional
//! gold-weight unit. Weights are entered in grams.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::validation::{FIELD_PRICE_BASIS, FIELD_PURITY};

// =============================================================================
// Purity
// =============================================================================

/// Alloy grade of a piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Purity {
    #[default]
    #[serde(rename = "14K")]
    K14,
    #[serde(rename = "18K")]
    K18,
    #[serde(rename = "24K")]
    K24,
}

impl Purity {
    /// All grades, in display order.
    pub const ALL: [Purity; 3] = [Purity::K14, Purity::K18, Purity::K24];

    /// Fraction of the pure-gold value attributed to this grade when selling.
    ///
    /// These are fixed business constants, never user-configurable.
    #[inline]
    pub const fn sales_ratio(&self) -> f64 {
        match self {
            Purity::K14 => 0.6435,
            Purity::K18 => 0.825,
            Purity::K24 => 1.0,
        }
    }

    /// Short label as shown on buttons and receipts.
    pub const fn label(&self) -> &'static str {
        match self {
            Purity::K14 => "14K",
            Purity::K18 => "18K",
            Purity::K24 => "24K",
        }
    }
}

impl fmt::Display for Purity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Purity {
    type Err = ValidationError;

    /// Accepts `14K`, `14k`, `18K`, `18k`, `24K`, `24k`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "14K" => Ok(Purity::K14),
            "18K" => Ok(Purity::K18),
            "24K" => Ok(Purity::K24),
            _ => Err(ValidationError::NotAllowed {
                field: FIELD_PURITY.to_string(),
                allowed: Purity::ALL.iter().map(|p| p.label().to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Purchase Purity
// =============================================================================

/// Grades the shop buys back. Pure 24K is not bought through this path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PurchasePurity {
    #[default]
    #[serde(rename = "14K")]
    K14,
    #[serde(rename = "18K")]
    K18,
}

impl PurchasePurity {
    pub const ALL: [PurchasePurity; 2] = [PurchasePurity::K14, PurchasePurity::K18];

    /// Buy-back coefficient for this grade.
    ///
    /// Calibrated independently from [`Purity::sales_ratio`]; the two tables
    /// are not derived from each other.
    #[inline]
    pub const fn multiplier(&self) -> f64 {
        match self {
            PurchasePurity::K14 => 0.55,
            PurchasePurity::K18 => 0.72,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            PurchasePurity::K14 => "14K",
            PurchasePurity::K18 => "18K",
        }
    }
}

impl fmt::Display for PurchasePurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<Purity> for PurchasePurity {
    type Error = ValidationError;

    fn try_from(purity: Purity) -> Result<Self, Self::Error> {
        match purity {
            Purity::K14 => Ok(PurchasePurity::K14),
            Purity::K18 => Ok(PurchasePurity::K18),
            Purity::K24 => Err(ValidationError::NotAllowed {
                field: FIELD_PURITY.to_string(),
                allowed: PurchasePurity::ALL
                    .iter()
                    .map(|p| p.label().to_string())
                    .collect(),
            }),
        }
    }
}

impl From<PurchasePurity> for Purity {
    fn from(purity: PurchasePurity) -> Self {
        match purity {
            PurchasePurity::K14 => Purity::K14,
            PurchasePurity::K18 => Purity::K18,
        }
    }
}

impl FromStr for PurchasePurity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PurchasePurity::try_from(s.parse::<Purity>()?)
    }
}

// =============================================================================
// Price Basis
// =============================================================================

/// Which spot price a sale is quoted against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PriceBasis {
    /// Price including VAT (card / invoice payments).
    #[default]
    Vat,
    /// Cash payment price.
    Cash,
}

impl fmt::Display for PriceBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceBasis::Vat => f.write_str("vat"),
            PriceBasis::Cash => f.write_str("cash"),
        }
    }
}

impl FromStr for PriceBasis {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vat" => Ok(PriceBasis::Vat),
            "cash" => Ok(PriceBasis::Cash),
            _ => Err(ValidationError::NotAllowed {
                field: FIELD_PRICE_BASIS.to_string(),
                allowed: vec!["vat".to_string(), "cash".to_string()],
            }),
        }
    }
}

// =============================================================================
// Spot Price
// =============================================================================

/// Today's gold price per don, entered by hand and cached between sessions.
///
/// A price of `0` means "not set yet".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SpotPrice {
    /// VAT-inclusive price per 3.75 g.
    pub vat_inclusive: f64,

    /// Cash price per 3.75 g.
    pub cash: f64,

    /// When the price was last saved. Display only.
    #[ts(as = "Option<String>")]
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl SpotPrice {
    pub fn new(vat_inclusive: f64, cash: f64) -> Self {
        SpotPrice {
            vat_inclusive,
            cash,
            last_updated: None,
        }
    }

    /// Returns the price for the requested basis.
    #[inline]
    pub fn price_for(&self, basis: PriceBasis) -> f64 {
        match basis {
            PriceBasis::Vat => self.vat_inclusive,
            PriceBasis::Cash => self.cash,
        }
    }

    /// Returns a copy stamped with the given save time.
    pub fn stamped(&self, at: DateTime<Utc>) -> Self {
        SpotPrice {
            last_updated: Some(at),
            ..self.clone()
        }
    }

    /// Checks that both prices are finite and not negative.
    pub fn validate(&self) -> CoreResult<()> {
        for (name, value) in [("VAT price", self.vat_inclusive), ("cash price", self.cash)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidSettings {
                    reason: format!("{} must be a finite amount >= 0, got {}", name, value),
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Discount Policy
// =============================================================================

/// How the discount price is derived.
///
/// Two business rules exist for the same screen, and they give different
/// numbers. The shop picks one explicitly.
///
/// ```text
/// margin m = 23%, base cost = 395,000
///
/// MarginPointReduction { points: 3 }   → 395,000 × 1.20         = 474,000
/// RateOnRegularPrice { rate: 3 }       → 395,000 × 1.23 × 0.97  = 471,274.5
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscountPolicy {
    /// Take `points` percentage points off the margin, then price from cost.
    MarginPointReduction { points: f64 },

    /// Take `rate_percent` off the regular price.
    RateOnRegularPrice { rate_percent: f64 },
}

impl DiscountPolicy {
    /// Markup over base cost that yields the discount price.
    ///
    /// Both policies are expressed as a markup so the engine can always use
    /// `discount_price = base_cost × (1 + markup / 100)`.
    pub fn effective_markup_percent(&self, margin_percent: f64) -> f64 {
        match *self {
            DiscountPolicy::MarginPointReduction { points } => margin_percent - points,
            DiscountPolicy::RateOnRegularPrice { rate_percent } => {
                ((1.0 + margin_percent / 100.0) * (1.0 - rate_percent / 100.0) - 1.0) * 100.0
            }
        }
    }

    fn parameter(&self) -> f64 {
        match *self {
            DiscountPolicy::MarginPointReduction { points } => points,
            DiscountPolicy::RateOnRegularPrice { rate_percent } => rate_percent,
        }
    }
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        DiscountPolicy::MarginPointReduction { points: 3.0 }
    }
}

// =============================================================================
// Margin Config
// =============================================================================

/// Per-purity margins plus the discount policy.
///
/// Margins are percentages over base cost. They are not clamped: a shop may
/// run a negative margin on a promotion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MarginConfig {
    pub k14: f64,
    pub k18: f64,
    pub k24: f64,
    #[serde(default)]
    pub discount: DiscountPolicy,
}

impl MarginConfig {
    /// Margin percent for a grade.
    #[inline]
    pub fn margin_for(&self, purity: Purity) -> f64 {
        match purity {
            Purity::K14 => self.k14,
            Purity::K18 => self.k18,
            Purity::K24 => self.k24,
        }
    }

    /// Returns a copy with one grade's margin replaced.
    pub fn with_margin(mut self, purity: Purity, percent: f64) -> Self {
        match purity {
            Purity::K14 => self.k14 = percent,
            Purity::K18 => self.k18 = percent,
            Purity::K24 => self.k24 = percent,
        }
        self
    }

    /// Returns a copy with a different discount policy.
    pub fn with_discount(mut self, discount: DiscountPolicy) -> Self {
        self.discount = discount;
        self
    }

    /// Rejects NaN/infinite margins and policy parameters.
    pub fn validate(&self) -> CoreResult<()> {
        for purity in Purity::ALL {
            if !self.margin_for(purity).is_finite() {
                return Err(CoreError::InvalidSettings {
                    reason: format!("{} margin is not finite", purity),
                });
            }
        }

        if !self.discount.parameter().is_finite() {
            return Err(CoreError::InvalidSettings {
                reason: "discount policy parameter is not finite".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for MarginConfig {
    /// ## Default Values
    /// - 14K: 25%
    /// - 18K: 23%
    /// - 24K: 15%
    /// - Discount: 3 margin points
    fn default() -> Self {
        MarginConfig {
            k14: 25.0,
            k18: 23.0,
            k24: 15.0,
            discount: DiscountPolicy::default(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
