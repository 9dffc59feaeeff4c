//! # Repository Module
//!
//! Database repository implementations for Aurum.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CLI command                                                            │
//! │       │                                                                 │
//! │       │  db.settings().load_snapshot()                                  │
//! │       ▼                                                                 │
//! │  SettingsRepository                                                     │
//! │  ├── load_spot_price / save_spot_price                                  │
//! │  ├── load_margins / save_margins                                        │
//! │  └── load_snapshot                                                      │
//! │       │                                                                 │
//! │       │  SQL (key/value upsert)                                         │
//! │       ▼                                                                 │
//! │  settings table                                                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`settings::SettingsRepository`] - Gold price and margin persistence

pub mod settings;
