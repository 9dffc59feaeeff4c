//! # Settings Commands
//!
//! Show and edit the gold price and the margin configuration.
//!
//! ## Save Then Publish
//! ```text
//! set_price / set_margins
//!      │
//!      ├── 1. build the new value from the current snapshot
//!      ├── 2. validate + persist (aurum-db)      ── error? snapshot untouched
//!      └── 3. publish a NEW snapshot (SettingsState)
//! ```

use std::sync::Arc;

use aurum_core::money::format_won;
use aurum_core::{DiscountPolicy, MarginConfig, PricingSettings, Purity};
use aurum_db::MARGINS_KEY;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::state::{ConfigState, DbState, SettingsState};

/// Current settings plus store bookkeeping.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub settings: PricingSettings,
    pub margins_updated_at: Option<DateTime<Utc>>,
}

/// A partial margin edit. Fields left `None` keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarginsUpdate {
    pub k14: Option<f64>,
    pub k18: Option<f64>,
    pub k24: Option<f64>,
    pub discount: Option<DiscountPolicy>,
}

impl MarginsUpdate {
    /// True when the edit would change nothing.
    pub fn is_empty(&self) -> bool {
        self.k14.is_none() && self.k18.is_none() && self.k24.is_none() && self.discount.is_none()
    }

    /// Applies the edit on top of `current`.
    pub fn apply(&self, current: MarginConfig) -> MarginConfig {
        let mut margins = current;
        for (purity, value) in [
            (Purity::K14, self.k14),
            (Purity::K18, self.k18),
            (Purity::K24, self.k24),
        ] {
            if let Some(percent) = value {
                margins = margins.with_margin(purity, percent);
            }
        }
        if let Some(discount) = self.discount {
            margins = margins.with_discount(discount);
        }
        margins
    }
}

/// Gets the current settings.
pub async fn show_settings(db: &DbState, settings: &SettingsState) -> ApiResult<SettingsView> {
    debug!("show_settings command");

    let margins_updated_at = db.inner().settings().updated_at(MARGINS_KEY).await?;

    Ok(SettingsView {
        settings: settings.snapshot().as_ref().clone(),
        margins_updated_at,
    })
}

/// Saves today's gold price and publishes the new snapshot.
pub async fn set_price(
    db: &DbState,
    settings: &SettingsState,
    vat_inclusive: f64,
    cash: f64,
) -> ApiResult<Arc<PricingSettings>> {
    debug!(vat = vat_inclusive, cash = cash, "set_price command");

    let spot = db.inner().settings().save_spot_price(vat_inclusive, cash).await?;
    let published = settings.publish(settings.snapshot().with_spot(spot));

    info!("Gold price published");
    Ok(published)
}

/// Saves a margin edit and publishes the new snapshot.
///
/// ## Errors
/// - `VALIDATION_ERROR` if the edit is empty
/// - `INVALID_SETTINGS` if a margin or the discount parameter is not finite
pub async fn set_margins(
    db: &DbState,
    settings: &SettingsState,
    update: MarginsUpdate,
) -> ApiResult<Arc<PricingSettings>> {
    debug!(?update, "set_margins command");

    if update.is_empty() {
        return Err(ApiError::validation(
            "Nothing to change: pass --k14, --k18, --k24, --discount-points or --discount-rate",
        ));
    }

    let current = settings.snapshot();
    let margins = update.apply(current.margins);

    db.inner().settings().save_margins(&margins).await?;
    let published = settings.publish(current.with_margins(margins));

    info!("Margins published");
    Ok(published)
}

/// Renders the settings as terminal text.
pub fn render_settings(view: &SettingsView, config: &ConfigState) -> String {
    let spot = &view.settings.spot;
    let margins = &view.settings.margins;

    let mut lines = Vec::new();

    lines.push("Gold price (per 3.75 g)".to_string());
    if spot.vat_inclusive > 0.0 || spot.cash > 0.0 {
        lines.push(format!("  VAT   {}", format_won(spot.vat_inclusive)));
        lines.push(format!("  Cash  {}", format_won(spot.cash)));
    } else {
        lines.push("  not set (aurum settings set-price --vat <n> --cash <n>)".to_string());
    }
    if let Some(at) = spot.last_updated {
        lines.push(format!("  Last updated: {}", config.format_timestamp(at)));
    }

    lines.push(String::new());
    lines.push("Margins".to_string());
    for purity in Purity::ALL {
        lines.push(format!("  {:<4}  {}%", purity.label(), margins.margin_for(purity)));
    }
    lines.push(format!("  Discount: {}", describe_discount(&margins.discount)));
    if let Some(at) = view.margins_updated_at {
        lines.push(format!("  Last updated: {}", config.format_timestamp(at)));
    }

    lines.join("\n")
}

fn describe_discount(policy: &DiscountPolicy) -> String {
    match *policy {
        DiscountPolicy::MarginPointReduction { points } => {
            format!("margin minus {} points", points)
        }
        DiscountPolicy::RateOnRegularPrice { rate_percent } => {
            format!("{}% off the regular price", rate_percent)
        }
    }
}
