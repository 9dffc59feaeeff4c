//! # Configuration State
//!
//! Display configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`AURUM_*`)
//! 2. Defaults (this file)
//!
//! Pricing settings (gold price, margins) are NOT configuration: they live in
//! the settings store and are edited through `aurum settings`.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Korea Standard Time, in hours east of UTC.
const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Offset used to render stored UTC timestamps.
    /// Default: +9 (KST)
    pub utc_offset_hours: i32,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `AURUM_UTC_OFFSET`: Hours east of UTC for timestamps (e.g., "9")
    pub fn from_env() -> Self {
        let mut config = ConfigState::default();

        if let Ok(offset) = std::env::var("AURUM_UTC_OFFSET") {
            if let Ok(hours) = offset.trim().parse::<i32>() {
                config.utc_offset_hours = hours;
            }
        }

        config
    }

    /// Formats a stored timestamp as `YYYY. M. D. HH:MM` in the configured
    /// offset.
    pub fn format_timestamp(&self, at: DateTime<Utc>) -> String {
        // Out-of-range offsets fall back to UTC.
        let offset = self
            .utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        at.with_timezone(&offset).format("%Y. %-m. %-d. %H:%M").to_string()
    }
}
