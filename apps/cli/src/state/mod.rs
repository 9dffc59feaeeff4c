//! # State Module
//!
//! Focused state types handed to commands, one concern each.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────────┐  ┌──────────────────┐      │
//! │  │   DbState    │  │    SettingsState     │  │   ConfigState    │      │
//! │  │              │  │                      │  │                  │      │
//! │  │  Database    │  │  RwLock<Arc<         │  │  currency suffix │      │
//! │  │  (SQLite     │  │    PricingSettings   │  │  UTC offset      │      │
//! │  │   pool)      │  │  >>                  │  │                  │      │
//! │  └──────────────┘  └──────────────────────┘  └──────────────────┘      │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: Database has internal connection pool (thread-safe)        │
//! │  • SettingsState: snapshots are swapped whole, never edited            │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod settings;

pub use config::ConfigState;
pub use db::DbState;
pub use settings::SettingsState;
