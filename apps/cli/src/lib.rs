//! # Aurum CLI Library
//!
//! Command-line front end for the Aurum pricing engines.
//!
//! ## Module Organization
//! ```text
//! aurum_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── settings.rs ◄─── Live pricing settings snapshot
//! │   └── config.rs   ◄─── Display configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Calculator outcome / guidance
//! │   ├── sales.rs    ◄─── Sale price command
//! │   ├── purchase.rs ◄─── Buy-back command
//! │   └── settings.rs ◄─── Gold price / margins commands
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use aurum_core::{PurchaseForm, SalesForm};
use aurum_db::{Database, DbConfig};
use directories::ProjectDirs;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, SettingsCommand};
use error::ApiError;
use state::{ConfigState, DbState, SettingsState};

/// Default log filter when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "warn,aurum=info,sqlx=warn";

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Invocation                                        │
/// │                                                                         │
/// │  1. ConfigState::from_env()  (display settings)                         │
/// │                                                                         │
/// │  2. purchase ──► engine ──► print            (no database needed)       │
/// │                                                                         │
/// │  3. sales / settings:                                                   │
/// │     • resolve database path (--db, AURUM_DB_PATH, data dir)             │
/// │     • connect + migrate                                                 │
/// │     • load snapshot into SettingsState                                  │
/// │     • run command, print                                                │
/// │     • close pool                                                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ConfigState::from_env();

    match cli.command {
        Command::Purchase(args) => {
            let form = PurchaseForm::from(args);
            let outcome = commands::purchase::quote_purchase(&form);
            emit(cli.json, &outcome, || commands::purchase::render_purchase(&outcome))
        }

        Command::Sales(args) => {
            let (db, settings) = open_store(cli.db).await?;

            let form = SalesForm::from(args);
            let outcome = commands::sales::quote_sales(&settings, &form);
            db.inner().close().await;

            emit(cli.json, &outcome, || commands::sales::render_sales(&outcome))
        }

        Command::Settings(command) => {
            let (db, settings) = open_store(cli.db).await?;

            let result = run_settings(&db, &settings, command).await;
            db.inner().close().await;

            let view = result?;
            emit(cli.json, &view, || commands::settings::render_settings(&view, &config))
        }
    }
}

async fn run_settings(
    db: &DbState,
    settings: &SettingsState,
    command: SettingsCommand,
) -> Result<commands::settings::SettingsView, ApiError> {
    match command {
        SettingsCommand::Show => {}
        SettingsCommand::SetPrice { vat, cash } => {
            commands::settings::set_price(db, settings, vat, cash).await?;
        }
        SettingsCommand::SetMargins(args) => {
            commands::settings::set_margins(db, settings, args.into()).await?;
        }
    }

    commands::settings::show_settings(db, settings).await
}

/// Connects to the settings store and loads the current snapshot.
async fn open_store(path: Option<PathBuf>) -> anyhow::Result<(DbState, SettingsState)> {
    let db_path = get_database_path(path)?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .map_err(ApiError::from)
        .with_context(|| format!("opening settings store at {}", db_path.display()))?;

    let snapshot = db
        .settings()
        .load_snapshot()
        .await
        .map_err(ApiError::from)?;

    Ok((DbState::new(db), SettingsState::new(snapshot)))
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so `--json` output on stdout stays machine-readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=aurum_db=trace` - Show trace for the settings store only
/// - Default: `warn,aurum=info,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path.
///
/// ## Resolution Order
/// 1. `--db <path>` (clap also reads `AURUM_DB_PATH` into this flag)
/// 2. Platform data directory:
///    - **macOS**: `~/Library/Application Support/com.aurum.aurum/aurum.db`
///    - **Windows**: `%APPDATA%\aurum\aurum\data\aurum.db`
///    - **Linux**: `~/.local/share/aurum/aurum.db`
pub fn get_database_path(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        return Ok(path);
    }

    let proj_dirs = ProjectDirs::from("com", "aurum", "aurum")
        .ok_or_else(|| anyhow!("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();

    // Create directory if it doesn't exist
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("creating {}", data_dir.display()))?;

    Ok(data_dir.join("aurum.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let dir = std::env::temp_dir().join("aurum-cli-path-test");
        let path = dir.join("nested").join("aurum.db");

        let resolved = get_database_path(Some(path.clone())).unwrap();
        assert_eq!(resolved, path);
        assert!(dir.join("nested").is_dir());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_bare_file_name_needs_no_directory() {
        let resolved = get_database_path(Some(PathBuf::from("aurum.db"))).unwrap();
        assert_eq!(resolved, PathBuf::from("aurum.db"));
    }

    #[tokio::test]
    async fn test_open_store_on_fresh_file() {
        let dir = std::env::temp_dir().join("aurum-cli-store-test");
        let _ = std::fs::remove_dir_all(&dir);

        let (db, settings) = open_store(Some(dir.join("aurum.db"))).await.unwrap();
        assert_eq!(settings.snapshot().margins.k14, 25.0);
        assert!(db.inner().health_check().await);

        db.inner().close().await;
        let _ = std::fs::remove_dir_all(dir);
    }
}
