//! # Settings State
//!
//! Holds the current `PricingSettings` snapshot.
//!
//! ## Publishing, Not Mutating
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  reader:  snapshot() ──► Arc<PricingSettings> v1 ──► compute quote      │
//! │                                                                         │
//! │  writer:  publish(v2) ──► lock ──► swap Arc ──► unlock                  │
//! │                                                                         │
//! │  A reader holding v1 keeps a consistent record while v2 goes live.      │
//! │  The lock guards only the pointer swap, never a computation.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use aurum_core::PricingSettings;

/// The live settings snapshot.
#[derive(Debug, Default)]
pub struct SettingsState {
    current: RwLock<Arc<PricingSettings>>,
}

impl SettingsState {
    /// Creates a new SettingsState from a loaded snapshot.
    pub fn new(settings: PricingSettings) -> Self {
        SettingsState {
            current: RwLock::new(Arc::new(settings)),
        }
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Arc<PricingSettings> {
        // The guarded value is a single Arc; a panicked writer cannot
        // leave it half-written.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replaces the snapshot and returns the published one.
    pub fn publish(&self, settings: PricingSettings) -> Arc<PricingSettings> {
        let next = Arc::new(settings);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurum_core::{MarginConfig, Purity, SpotPrice};

    #[test]
    fn test_publish_replaces_snapshot() {
        let state = SettingsState::default();
        let before = state.snapshot();

        let next = before.with_spot(SpotPrice::new(350_000.0, 320_000.0));
        state.publish(next);

        let after = state.snapshot();
        assert_eq!(after.spot.vat_inclusive, 350_000.0);
    }

    #[test]
    fn test_old_snapshot_is_untouched() {
        let state = SettingsState::new(PricingSettings::default());
        let held = state.snapshot();

        let margins = MarginConfig::default().with_margin(Purity::K18, 40.0);
        state.publish(held.with_margins(margins));

        assert_eq!(held.margins.k18, 23.0);
        assert_eq!(state.snapshot().margins.k18, 40.0);
        assert!(!Arc::ptr_eq(&held, &state.snapshot()));
    }
}
