//! Shared test utilities for `StockBuddy`.
//!
//! Helpers for setting up in-memory databases and trackers with a fixed clock.

use crate::{
    core::{product::Catalog, tracker::Tracker},
    errors::Result,
    store::MemoryStore,
};
use sea_orm::DatabaseConnection;

/// Timestamp stamped on every history entry by [`setup_tracker`].
pub const FIXED_TIMESTAMP: &str = "10/19/2026, 3:04:05 PM";

fn fixed_clock() -> String {
    FIXED_TIMESTAMP.to_string()
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a tracker over an empty [`MemoryStore`] with the built-in catalog
/// and a fixed clock.
pub async fn setup_tracker() -> Result<Tracker<MemoryStore>> {
    Ok(Tracker::load(MemoryStore::new(), Catalog::builtin())
        .await?
        .with_clock(fixed_clock))
}
