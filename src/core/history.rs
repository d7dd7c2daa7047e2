//! History log - ordered record of accepted movements, most recent first.
//!
//! Entries are immutable once appended and can only be removed explicitly.
//! Removing an entry never touches the stock ledger.

use crate::core::{
    movement::{Movement, MovementAction, Quantity},
    stock::UnitType,
};
use serde::{Deserialize, Serialize};

/// One accepted movement as recorded in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unique id within the live history
    pub id: u64,
    /// Product the movement applied to
    pub product_id: i64,
    /// Quantity moved
    pub quantity: Quantity,
    /// Unit type moved
    #[serde(rename = "type")]
    pub unit: UnitType,
    /// Free-text note, empty when none was given
    #[serde(default)]
    pub note: String,
    /// Direction of the movement
    pub action: MovementAction,
    /// Human-readable capture time
    pub timestamp: String,
}

impl HistoryEntry {
    /// Snapshots `movement` into an entry.
    #[must_use]
    pub fn from_movement(id: u64, movement: &Movement, timestamp: impl Into<String>) -> Self {
        let details = movement.details();
        Self {
            id,
            product_id: details.product_id,
            quantity: details.quantity,
            unit: details.unit,
            note: details.note.clone(),
            action: movement.action(),
            timestamp: timestamp.into(),
        }
    }
}

/// One page of the history view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPage<'a> {
    /// Entries on this page, most recent first
    pub entries: &'a [HistoryEntry],
    /// 1-based page number actually shown (after clamping)
    pub page: usize,
    /// Number of pages; at least 1
    pub total_pages: usize,
    /// Number of entries across all pages
    pub total_entries: usize,
}

/// The ordered movement history.
///
/// Serialized as a bare array of entries. The highest id ever handed out is
/// kept next to the entries (and persisted under its own key) so that ids of
/// deleted entries are never assigned again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<HistoryEntry>", into = "Vec<HistoryEntry>")]
pub struct History {
    entries: Vec<HistoryEntry>,
    last_id: u64,
}

impl From<Vec<HistoryEntry>> for History {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        let by_len = u64::try_from(entries.len()).unwrap_or(u64::MAX);
        let by_max = entries.iter().map(|e| e.id).max().unwrap_or(0);
        Self {
            last_id: by_len.max(by_max),
            entries,
        }
    }
}

impl From<History> for Vec<HistoryEntry> {
    fn from(history: History) -> Self {
        history.entries
    }
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest id handed out so far, including ids of deleted entries.
    #[must_use]
    pub const fn last_id(&self) -> u64 {
        self.last_id
    }

    /// Raises the high-water mark to at least `last_id`. Used when loading a
    /// persisted sequence; a lower value than the entries imply is ignored.
    #[must_use]
    pub fn with_last_id(mut self, last_id: u64) -> Self {
        self.last_id = self.last_id.max(last_id);
        self
    }

    /// Id the next appended entry will receive.
    ///
    /// Equals `len() + 1` as long as nothing was deleted. Deleting entries
    /// never lowers it, so a deleted id is not handed out again.
    #[must_use]
    pub const fn next_id(&self) -> u64 {
        self.last_id.saturating_add(1)
    }

    /// Records `movement` at the front of the history and returns the new
    /// entry.
    pub fn append(&mut self, movement: &Movement, timestamp: impl Into<String>) -> HistoryEntry {
        let entry = HistoryEntry::from_movement(self.next_id(), movement, timestamp);
        self.last_id = entry.id;
        self.entries.insert(0, entry.clone());
        entry
    }

    /// Removes the first entry with `id`. Returns whether anything was
    /// removed; deleting an unknown id is a no-op.
    pub fn delete(&mut self, id: u64) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Looks an entry up by id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries for one product, most recent first.
    pub fn for_product(&self, product_id: i64) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().filter(move |e| e.product_id == product_id)
    }

    /// Returns one page of the history. Pages are 1-based; page 0 is treated
    /// as page 1 and pages past the end show the last page.
    #[must_use]
    pub fn page(&self, page: usize, page_size: usize) -> HistoryPage<'_> {
        paginate(&self.entries, page, page_size)
    }
}

/// Splits `entries` into pages of `page_size` and returns the requested one.
#[must_use]
pub fn paginate(entries: &[HistoryEntry], page: usize, page_size: usize) -> HistoryPage<'_> {
    let page_size = page_size.max(1);
    let total_entries = entries.len();
    let total_pages = total_entries.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_entries);

    HistoryPage {
        entries: &entries[start..end],
        page,
        total_pages,
        total_entries,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::movement::MovementDetails;

    fn movement(action: MovementAction, qty: u64) -> Movement {
        Movement::new(
            action,
            MovementDetails {
                product_id: 1,
                unit: UnitType::Bags,
                quantity: Quantity::new(qty).unwrap(),
                note: String::new(),
            },
        )
    }

    #[test]
    fn test_append_prepends_with_sequential_ids() {
        let mut history = History::new();
        let first = history.append(&movement(MovementAction::Import, 10), "t1");
        let second = history.append(&movement(MovementAction::Export, 4), "t2");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(history.entries()[0], second);
        assert_eq!(history.entries()[1], first);
    }

    #[test]
    fn test_delete_is_idempotent_and_does_not_renumber() {
        let mut history = History::new();
        history.append(&movement(MovementAction::Import, 1), "t1");
        history.append(&movement(MovementAction::Import, 2), "t2");
        history.append(&movement(MovementAction::Import, 3), "t3");

        assert!(history.delete(2));
        let after_once = history.clone();
        assert!(!history.delete(2));
        assert_eq!(history, after_once);

        let ids: Vec<u64> = history.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_ids_stay_unique_after_deletion() {
        let mut history = History::new();
        history.append(&movement(MovementAction::Import, 1), "t1");
        history.append(&movement(MovementAction::Import, 2), "t2");
        history.append(&movement(MovementAction::Import, 3), "t3");
        history.delete(1);

        // length + 1 would be 3, which is still live
        let entry = history.append(&movement(MovementAction::Import, 4), "t4");
        assert_eq!(entry.id, 4);
    }

    #[test]
    fn test_deleted_newest_id_is_not_reused() {
        let mut history = History::new();
        history.append(&movement(MovementAction::Import, 1), "t1");
        history.append(&movement(MovementAction::Import, 2), "t2");
        history.append(&movement(MovementAction::Import, 3), "t3");
        assert!(history.delete(3));

        let entry = history.append(&movement(MovementAction::Import, 4), "t4");
        assert_eq!(entry.id, 4);
        assert_eq!(history.last_id(), 4);
    }

    #[test]
    fn test_loaded_sequence_survives_deleting_everything() {
        let mut history = History::new();
        history.append(&movement(MovementAction::Import, 1), "t1");
        history.append(&movement(MovementAction::Import, 2), "t2");
        history.delete(2);
        history.delete(1);

        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, "[]");

        let reloaded = serde_json::from_str::<History>(&json)
            .unwrap()
            .with_last_id(history.last_id());
        assert_eq!(reloaded.next_id(), 3);

        // A stale sequence never pulls the mark below the live ids
        let entries = r#"[{"id":9,"productId":1,"quantity":1,"type":"bags","note":"","action":"import","timestamp":"t"}]"#;
        let stale = serde_json::from_str::<History>(entries).unwrap().with_last_id(2);
        assert_eq!(stale.next_id(), 10);
    }

    #[test]
    fn test_delete_removes_only_one_entry_with_duplicate_ids() {
        let entries = r#"[
            {"id":2,"productId":1,"quantity":5,"type":"bags","note":"","action":"import","timestamp":"t2"},
            {"id":2,"productId":1,"quantity":3,"type":"bags","note":"","action":"import","timestamp":"t1"}
        ]"#;
        let mut history: History = serde_json::from_str(entries).unwrap();

        assert!(history.delete(2));
        assert_eq!(history.len(), 1);
        assert_eq!(history.entries()[0].timestamp, "t1");
    }

    #[test]
    fn test_pagination() {
        let mut history = History::new();
        for i in 1..=7 {
            history.append(&movement(MovementAction::Import, i), format!("t{i}"));
        }

        let first = history.page(1, 3);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_entries, 7);
        assert_eq!(first.entries.len(), 3);
        assert_eq!(first.entries[0].id, 7);

        let last = history.page(99, 3);
        assert_eq!(last.page, 3);
        assert_eq!(last.entries.len(), 1);
        assert_eq!(last.entries[0].id, 1);

        assert_eq!(history.page(0, 3).page, 1);

        let empty = History::new();
        let page = empty.page(1, 10);
        assert_eq!(page.total_pages, 1);
        assert!(page.entries.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let mut history = History::new();
        history.append(&movement(MovementAction::Import, 10), "10/19/2026, 3:04:05 PM");

        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(
            json,
            r#"[{"id":1,"productId":1,"quantity":10,"type":"bags","note":"","action":"import","timestamp":"10/19/2026, 3:04:05 PM"}]"#
        );
    }

    #[test]
    fn test_deserialize_rejects_invalid_entries() {
        let zero_quantity = r#"[{"id":1,"productId":1,"quantity":0,"type":"bags","note":"","action":"import","timestamp":"t"}]"#;
        assert!(serde_json::from_str::<History>(zero_quantity).is_err());

        let bad_unit = r#"[{"id":1,"productId":1,"quantity":1,"type":"crates","note":"","action":"import","timestamp":"t"}]"#;
        assert!(serde_json::from_str::<History>(bad_unit).is_err());

        let missing_note = r#"[{"id":1,"productId":1,"quantity":1,"type":"bags","action":"export","timestamp":"t"}]"#;
        let history: History = serde_json::from_str(missing_note).unwrap();
        assert_eq!(history.entries()[0].note, "");
    }
}
