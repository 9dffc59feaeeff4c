//! # Pricing Settings Snapshot
//!
//! The one record the sales engine reads besides its own input.
//!
//! ## Snapshot, Not Singleton
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Settings store ──load──► PricingSettings (immutable) ──&──► engine     │
//! │        ▲                                                                │
//! │        │ save                                                           │
//! │  user edits price/margins ──► NEW PricingSettings is published          │
//! │                                                                         │
//! │  The engine never sees a half-updated record: a writer replaces the     │
//! │  whole snapshot instead of changing fields in place.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::types::{MarginConfig, SpotPrice};

/// Gold price and margins as of one recomputation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingSettings {
    pub spot: SpotPrice,
    pub margins: MarginConfig,
}

impl PricingSettings {
    pub fn new(spot: SpotPrice, margins: MarginConfig) -> Self {
        PricingSettings { spot, margins }
    }

    /// Returns a new snapshot with the spot price replaced.
    pub fn with_spot(&self, spot: SpotPrice) -> Self {
        PricingSettings {
            spot,
            margins: self.margins,
        }
    }

    /// Returns a new snapshot with the margins replaced.
    pub fn with_margins(&self, margins: MarginConfig) -> Self {
        PricingSettings {
            spot: self.spot.clone(),
            margins,
        }
    }

    /// Checks both halves of the snapshot.
    pub fn validate(&self) -> CoreResult<()> {
        self.spot.validate()?;
        self.margins.validate()
    }
}
