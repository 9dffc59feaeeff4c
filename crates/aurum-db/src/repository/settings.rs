//! # Settings Repository
//!
//! Persists the gold price and the margin configuration between sessions.
//!
//! ## Storage Layout
//! ```text
//! settings
//! ┌────────────┬──────────────────────────────────────────────┬──────────────┐
//! │ key        │ value (JSON)                                 │ updated_at   │
//! ├────────────┼──────────────────────────────────────────────┼──────────────┤
//! │ goldPrice  │ {"vatInclusive":350000,"cash":320000,...}    │ RFC 3339 UTC │
//! │ margins    │ {"k14":25,"k18":23,"k24":15,"discount":{..}} │ RFC 3339 UTC │
//! └────────────┴──────────────────────────────────────────────┴──────────────┘
//! ```
//!
//! A missing row loads as the default. A row that no longer parses is an
//! error: silently replacing it with defaults would misprice every quote.

use aurum_core::{MarginConfig, PricingSettings, SpotPrice};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Key of the gold price row.
pub const GOLD_PRICE_KEY: &str = "goldPrice";

/// Key of the margin configuration row.
pub const MARGINS_KEY: &str = "margins";

/// Repository for the key/value settings table.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.settings();
///
/// repo.save_spot_price(350_000.0, 320_000.0).await?;
/// let snapshot = repo.load_snapshot().await?;
/// ```
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    // =========================================================================
    // Gold Price
    // =========================================================================

    /// Loads the cached gold price, or the unset default.
    pub async fn load_spot_price(&self) -> DbResult<SpotPrice> {
        Ok(self.get_json(GOLD_PRICE_KEY).await?.unwrap_or_default())
    }

    /// Saves a new gold price and stamps it with the current time.
    ///
    /// ## Returns
    /// The stored record, including its `last_updated` stamp.
    pub async fn save_spot_price(&self, vat_inclusive: f64, cash: f64) -> DbResult<SpotPrice> {
        let now = Utc::now();
        let spot = SpotPrice::new(vat_inclusive, cash).stamped(now);
        spot.validate()?;

        self.put_json(GOLD_PRICE_KEY, &spot, now).await?;

        info!(vat = vat_inclusive, cash = cash, "Gold price saved");
        Ok(spot)
    }

    // =========================================================================
    // Margins
    // =========================================================================

    /// Loads the margin configuration, or the default margins.
    pub async fn load_margins(&self) -> DbResult<MarginConfig> {
        Ok(self.get_json(MARGINS_KEY).await?.unwrap_or_default())
    }

    /// Validates and saves a margin configuration.
    pub async fn save_margins(&self, margins: &MarginConfig) -> DbResult<()> {
        margins.validate()?;

        self.put_json(MARGINS_KEY, margins, Utc::now()).await?;

        info!(
            k14 = margins.k14,
            k18 = margins.k18,
            k24 = margins.k24,
            "Margins saved"
        );
        Ok(())
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// Loads both halves into one immutable snapshot.
    ///
    /// Rows edited outside the store (a negative price, a non-finite margin)
    /// are rejected here, before any engine reads them.
    pub async fn load_snapshot(&self) -> DbResult<PricingSettings> {
        let spot = self.load_spot_price().await?;
        let margins = self.load_margins().await?;

        let snapshot = PricingSettings::new(spot, margins);
        snapshot.validate()?;

        Ok(snapshot)
    }

    /// When a key was last written, if ever.
    pub async fn updated_at(&self, key: &str) -> DbResult<Option<DateTime<Utc>>> {
        let raw: Option<String> =
            sqlx::query_scalar("SELECT updated_at FROM settings WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        raw.map(|text| {
            DateTime::parse_from_rfc3339(&text)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| DbError::Serialization {
                    key: key.to_string(),
                    reason: e.to_string(),
                })
        })
        .transpose()
    }

    // =========================================================================
    // Raw Access
    // =========================================================================

    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> DbResult<Option<T>> {
        let raw: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match raw {
            Some(text) => {
                debug!(key = %key, "Loaded setting");
                serde_json::from_str(&text)
                    .map(Some)
                    .map_err(|e| DbError::serialization(key, e))
            }
            None => {
                debug!(key = %key, "Setting not stored, using default");
                Ok(None)
            }
        }
    }

    async fn put_json<T: Serialize>(&self, key: &str, value: &T, at: DateTime<Utc>) -> DbResult<()> {
        let payload = serde_json::to_string(value).map_err(|e| DbError::serialization(key, e))?;

        sqlx::query(
            r#"
            INSERT INTO settings (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(payload)
        .bind(at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!(key = %key, "Stored setting");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use aurum_core::{DiscountPolicy, Purity};

    async fn repo() -> (Database, SettingsRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.settings();
        (db, repo)
    }

    #[tokio::test]
    async fn test_empty_store_loads_defaults() {
        let (_db, repo) = repo().await;

        let snapshot = repo.load_snapshot().await.unwrap();
        assert_eq!(snapshot, PricingSettings::default());
        assert_eq!(repo.updated_at(GOLD_PRICE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_spot_price_round_trip() {
        let (_db, repo) = repo().await;

        let saved = repo.save_spot_price(350_000.0, 320_000.0).await.unwrap();
        assert!(saved.last_updated.is_some());

        let loaded = repo.load_spot_price().await.unwrap();
        assert_eq!(loaded.vat_inclusive, 350_000.0);
        assert_eq!(loaded.cash, 320_000.0);
        assert_eq!(loaded.last_updated, saved.last_updated);
        assert!(repo.updated_at(GOLD_PRICE_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_second_save_replaces_first() {
        let (_db, repo) = repo().await;

        repo.save_spot_price(350_000.0, 320_000.0).await.unwrap();
        repo.save_spot_price(360_000.0, 330_000.0).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(repo.load_spot_price().await.unwrap().vat_inclusive, 360_000.0);
    }

    #[tokio::test]
    async fn test_margins_round_trip() {
        let (_db, repo) = repo().await;

        let margins = MarginConfig::default()
            .with_margin(Purity::K18, 30.0)
            .with_discount(DiscountPolicy::RateOnRegularPrice { rate_percent: 5.0 });
        repo.save_margins(&margins).await.unwrap();

        assert_eq!(repo.load_margins().await.unwrap(), margins);

        let snapshot = repo.load_snapshot().await.unwrap();
        assert_eq!(snapshot.margins, margins);
        assert_eq!(snapshot.spot, SpotPrice::default());
    }

    #[tokio::test]
    async fn test_rejects_invalid_values() {
        let (_db, repo) = repo().await;

        let err = repo.save_spot_price(-1.0, 320_000.0).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidSettings(_)));

        let margins = MarginConfig::default().with_margin(Purity::K14, f64::NAN);
        let err = repo.save_margins(&margins).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidSettings(_)));

        // Nothing was written.
        assert_eq!(repo.load_snapshot().await.unwrap(), PricingSettings::default());
    }

    #[tokio::test]
    async fn test_corrupted_row_is_an_error() {
        let (_db, repo) = repo().await;

        sqlx::query("INSERT INTO settings (key, value, updated_at) VALUES (?1, 'not json', ?2)")
            .bind(MARGINS_KEY)
            .bind(Utc::now().to_rfc3339())
            .execute(&repo.pool)
            .await
            .unwrap();

        let err = repo.load_margins().await.unwrap_err();
        assert!(matches!(err, DbError::Serialization { ref key, .. } if key == MARGINS_KEY));
    }

    #[tokio::test]
    async fn test_snapshot_rejects_hand_edited_negative_price() {
        let (_db, repo) = repo().await;

        sqlx::query("INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)")
            .bind(GOLD_PRICE_KEY)
            .bind(r#"{"vatInclusive":-350000,"cash":320000}"#)
            .bind(Utc::now().to_rfc3339())
            .execute(&repo.pool)
            .await
            .unwrap();

        let err = repo.load_snapshot().await.unwrap_err();
        assert!(matches!(err, DbError::InvalidSettings(_)));
    }

    #[tokio::test]
    async fn test_margins_without_discount_get_default_policy() {
        let (_db, repo) = repo().await;

        sqlx::query("INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)")
            .bind(MARGINS_KEY)
            .bind(r#"{"k14":20,"k18":21,"k24":22}"#)
            .bind(Utc::now().to_rfc3339())
            .execute(&repo.pool)
            .await
            .unwrap();

        let margins = repo.load_margins().await.unwrap();
        assert_eq!(margins.k24, 22.0);
        assert_eq!(margins.discount, DiscountPolicy::default());
    }
}
