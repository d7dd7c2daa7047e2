//! Persisted key-value store abstraction.
//!
//! The ledger and history never touch a storage backend directly. They are
//! handed something implementing [`KeyValueStore`], which only knows how to get
//! and set opaque strings. Production uses [`DatabaseStore`]; tests use
//! [`MemoryStore`].

/// `SeaORM`-backed store over the `system_state` table
pub mod database;
/// In-memory store for tests and ephemeral sessions
pub mod memory;

pub use database::DatabaseStore;
pub use memory::MemoryStore;

use crate::errors::Result;
use async_trait::async_trait;

/// Key under which the serialized stock levels are stored.
pub const STOCKS_KEY: &str = "stocks";
/// Key under which the serialized movement history is stored.
pub const HISTORY_KEY: &str = "history";
/// Key under which the highest history id ever assigned is stored.
pub const HISTORY_SEQ_KEY: &str = "history_seq";

/// A generic string key-value store.
///
/// Values are opaque blobs. `set` overwrites whatever was stored under the key
/// (last writer wins).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing was stored.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be written.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
