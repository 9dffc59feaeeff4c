//! # Database State
//!
//! Wraps the `Database` connection for use in commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn set_price(db: &DbState, ...) -> ApiResult<...> {
//!     let spot = db.inner().settings().save_spot_price(vat, cash).await?;
//!     ...
//! }
//! ```

use aurum_db::Database;

/// Wrapper around `Database` handed to commands that touch the store.
#[derive(Debug)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
