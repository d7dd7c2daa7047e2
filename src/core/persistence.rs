//! Load and save of the stock ledger and history through a [`KeyValueStore`].
//!
//! Both collections are stored as JSON documents and always written in full.
//! Loading is forgiving: a missing value, a `null`, or a document that fails to
//! parse or validate yields an empty collection and a warning in the log.
//! Only failures of the store itself are returned as errors.

use crate::{
    core::{history::History, inventory::Inventory, stock::StockLedger},
    errors::{Error, Result},
    store::{HISTORY_KEY, HISTORY_SEQ_KEY, KeyValueStore, STOCKS_KEY},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

/// Decodes a stored JSON document, substituting `T::default()` for a missing,
/// `null`, or corrupt value.
pub fn decode_or_default<T>(key: &str, raw: Option<&str>) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = raw else {
        debug!(key, "No persisted value, starting empty");
        return T::default();
    };

    match serde_json::from_str::<Option<T>>(raw) {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            let error = Error::PersistedDataCorrupt {
                key: key.to_string(),
                message: e.to_string(),
            };
            warn!(%error, "Discarding unreadable persisted value");
            T::default()
        }
    }
}

async fn load<S, T>(store: &S, key: &str) -> Result<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    let raw = store.get(key).await?;
    Ok(decode_or_default(key, raw.as_deref()))
}

async fn save<S, T>(store: &S, key: &str, value: &T) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let json = serde_json::to_string(value)?;
    store.set(key, &json).await
}

/// Reads the stock ledger.
///
/// # Errors
/// Returns an error only if the store cannot be read.
pub async fn load_stock<S: KeyValueStore + ?Sized>(store: &S) -> Result<StockLedger> {
    load(store, STOCKS_KEY).await
}

/// Reads the history together with its id sequence.
///
/// # Errors
/// Returns an error only if the store cannot be read.
pub async fn load_history<S: KeyValueStore + ?Sized>(store: &S) -> Result<History> {
    let history: History = load(store, HISTORY_KEY).await?;
    let last_id: u64 = load(store, HISTORY_SEQ_KEY).await?;
    Ok(history.with_last_id(last_id))
}

/// Overwrites the persisted stock ledger.
///
/// # Errors
/// Returns an error if encoding fails or the store cannot be written.
pub async fn save_stock<S: KeyValueStore + ?Sized>(store: &S, stock: &StockLedger) -> Result<()> {
    save(store, STOCKS_KEY, stock).await
}

/// Overwrites the persisted history and its id sequence.
///
/// # Errors
/// Returns an error if encoding fails or the store cannot be written.
pub async fn save_history<S: KeyValueStore + ?Sized>(store: &S, history: &History) -> Result<()> {
    save(store, HISTORY_KEY, history).await?;
    save(store, HISTORY_SEQ_KEY, &history.last_id()).await
}

/// Reads both collections into a fresh [`Inventory`].
///
/// # Errors
/// Returns an error only if the store cannot be read.
#[instrument(skip(store))]
pub async fn load_inventory<S: KeyValueStore + ?Sized>(store: &S) -> Result<Inventory> {
    let stock = load_stock(store).await?;
    let history = load_history(store).await?;
    debug!(
        products = stock.records().count(),
        entries = history.len(),
        "Loaded inventory"
    );
    Ok(Inventory::new(stock, history))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::{movement::MovementAction, stock::UnitType},
        store::MemoryStore,
    };

    const NOW: &str = "1/2/2026, 9:00:00 AM";

    fn sample_inventory() -> Inventory {
        let state = Inventory::default()
            .edit_quantity(1, "10")
            .state
            .edit_note(1, "first delivery")
            .state;
        let state = state.submit(1, MovementAction::Import, NOW).unwrap().state;
        let state = state
            .edit_quantity(3, "4")
            .state
            .select_unit(3, UnitType::Cartons)
            .state;
        let state = state.submit(3, MovementAction::Import, NOW).unwrap().state;
        let state = state.edit_quantity(1, "6").state;
        state.submit(1, MovementAction::Export, NOW).unwrap().state
    }

    #[tokio::test]
    async fn test_missing_values_load_empty() -> Result<()> {
        let store = MemoryStore::new();
        let inventory = load_inventory(&store).await?;
        assert_eq!(inventory, Inventory::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_values_load_empty() -> Result<()> {
        let store = MemoryStore::with_values([
            (STOCKS_KEY, "{not json"),
            (HISTORY_KEY, r#"[{"id":1,"quantity":-3}]"#),
        ]);
        let inventory = load_inventory(&store).await?;
        assert!(inventory.stock().records().next().is_none());
        assert!(inventory.history().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_null_values_load_empty() -> Result<()> {
        let store = MemoryStore::with_values([(STOCKS_KEY, "null"), (HISTORY_KEY, "null")]);
        let inventory = load_inventory(&store).await?;
        assert_eq!(inventory, Inventory::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() -> Result<()> {
        let store = MemoryStore::new();
        let original = sample_inventory();

        save_stock(&store, original.stock()).await?;
        save_history(&store, original.history()).await?;

        let loaded = load_inventory(&store).await?;
        assert_eq!(loaded.stock(), original.stock());
        assert_eq!(loaded.history(), original.history());
        Ok(())
    }

    #[tokio::test]
    async fn test_id_sequence_survives_reload_after_deleting_newest() -> Result<()> {
        let store = MemoryStore::new();
        let state = sample_inventory();
        let newest = state.history().entries()[0].id;
        let state = state.delete_history(newest).state;
        save_history(&store, state.history()).await?;

        assert_eq!(
            store.get(HISTORY_SEQ_KEY).await?.as_deref(),
            Some(newest.to_string().as_str())
        );

        let loaded = load_inventory(&store).await?;
        assert_eq!(loaded.history().next_id(), newest + 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_sequence_falls_back_to_entries() -> Result<()> {
        let store = MemoryStore::with_values([
            (
                HISTORY_KEY,
                r#"[{"id":4,"productId":1,"quantity":2,"type":"bags","note":"","action":"import","timestamp":"t"}]"#,
            ),
            (HISTORY_SEQ_KEY, "not a number"),
        ]);

        let history = load_history(&store).await?;
        assert_eq!(history.next_id(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_reads_documents_written_by_earlier_sessions() -> Result<()> {
        let store = MemoryStore::with_values([
            (STOCKS_KEY, r#"{"2":{"bags":1,"packets":7,"cartons":0}}"#),
            (
                HISTORY_KEY,
                r#"[{"id":1,"productId":2,"quantity":7,"type":"packets","note":"","action":"import","timestamp":"3/1/2025, 10:00:00 AM"}]"#,
            ),
        ]);

        let inventory = load_inventory(&store).await?;
        assert_eq!(inventory.stock().quantity(2, UnitType::Packets), 7);
        assert_eq!(inventory.history().entries()[0].product_id, 2);
        Ok(())
    }
}
