//! # Aurum CLI Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  main.rs ────► logging, argument parsing                               │
//! │                                                                         │
//! │  lib.rs ─────► database path, state, command dispatch                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use aurum_cli::cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    aurum_cli::init_tracing();

    aurum_cli::run(Cli::parse()).await
}
