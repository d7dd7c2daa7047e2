//! Text rendering of stock levels, history, and command outcomes.
//!
//! Everything here is framework-agnostic and returns plain strings (with light
//! Markdown) that the bot layer sends as-is.

use crate::core::{
    history::{HistoryEntry, HistoryPage},
    inventory::Outcome,
    product::{Catalog, Product},
    stock::StockRecord,
};

/// Renders the stock block for one product.
#[must_use]
pub fn format_stock(product: &Product, record: Option<&StockRecord>) -> String {
    let mut out = format!("**{}**\n", product.name);
    match record {
        Some(record) => {
            for (unit, qty) in record.iter() {
                out.push_str(&format!("{unit}: {qty}\n"));
            }
        }
        None => out.push_str("No stock available\n"),
    }
    out
}

/// Renders one history entry, e.g. `#2 Product 1: 10 bags (import) - restock`
/// followed by the capture time.
#[must_use]
pub fn format_entry(entry: &HistoryEntry, catalog: &Catalog) -> String {
    let mut line = format!(
        "`#{}` {}: {} {} ({})",
        entry.id,
        catalog.display_name(entry.product_id),
        entry.quantity,
        entry.unit,
        entry.action
    );
    if !entry.note.is_empty() {
        line.push_str(&format!(" - {}", entry.note));
    }
    line.push_str(&format!("\n  {}", entry.timestamp));
    line
}

/// Renders a page of the history view.
#[must_use]
pub fn format_history_page(page: &HistoryPage<'_>, catalog: &Catalog) -> String {
    if page.total_entries == 0 {
        return "No history recorded yet.".to_string();
    }

    let header = format!(
        "**Stock History** (page {}/{}, {} entries)",
        page.page, page.total_pages, page.total_entries
    );
    let lines: Vec<String> = page
        .entries
        .iter()
        .map(|entry| format_entry(entry, catalog))
        .collect();
    format!("{header}\n{}\n", lines.join("\n"))
}

/// Renders the reply for an import/export outcome.
#[must_use]
pub fn format_outcome(outcome: &Outcome, product: &Product) -> String {
    match outcome {
        Outcome::Applied(entry) => format!(
            "✅ Recorded {} {} ({}) for {} (History ID: {})",
            entry.quantity, entry.unit, entry.action, product.name, entry.id
        ),
        Outcome::Rejected(_) => format!("❌ Not enough stock! ({})", product.name),
        Outcome::Ignored | Outcome::Edited | Outcome::Deleted(_) => {
            format!("Nothing recorded for {}.", product.name)
        }
    }
}

/// Renders the reply for a history deletion.
#[must_use]
pub fn format_deletion(removed: bool) -> String {
    if removed {
        "🗑️ History entry deleted. Stock levels were not changed.".to_string()
    } else {
        "No history entry with that ID.".to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{
        history::History,
        movement::{Movement, MovementAction, MovementDetails, Quantity},
        stock::UnitType,
    };

    fn entry(note: &str) -> HistoryEntry {
        let movement = Movement::new(
            MovementAction::Import,
            MovementDetails {
                product_id: 1,
                unit: UnitType::Bags,
                quantity: Quantity::new(10).unwrap(),
                note: note.to_string(),
            },
        );
        HistoryEntry::from_movement(1, &movement, "10/19/2026, 3:04:05 PM")
    }

    #[test]
    fn test_format_stock() {
        let catalog = Catalog::builtin();
        let product = catalog.get(1).unwrap();

        assert_eq!(
            format_stock(product, None),
            "**Product 1**\nNo stock available\n"
        );

        let record = StockRecord {
            bags: 10,
            packets: 0,
            cartons: 2,
        };
        assert_eq!(
            format_stock(product, Some(&record)),
            "**Product 1**\nbags: 10\npackets: 0\ncartons: 2\n"
        );
    }

    #[test]
    fn test_format_entry_with_and_without_note() {
        let catalog = Catalog::builtin();
        assert_eq!(
            format_entry(&entry(""), &catalog),
            "`#1` Product 1: 10 bags (import)\n  10/19/2026, 3:04:05 PM"
        );
        assert!(format_entry(&entry("restock"), &catalog).contains("(import) - restock"));
    }

    #[test]
    fn test_format_empty_history() {
        let catalog = Catalog::builtin();
        let history = History::new();
        assert_eq!(
            format_history_page(&history.page(1, 10), &catalog),
            "No history recorded yet."
        );
    }

    #[test]
    fn test_format_history_page_lists_entries() {
        let catalog = Catalog::builtin();
        let mut history = History::new();
        let movement = Movement::new(
            MovementAction::Export,
            MovementDetails {
                product_id: 2,
                unit: UnitType::Packets,
                quantity: Quantity::new(3).unwrap(),
                note: String::new(),
            },
        );
        history.append(&movement, "t1");
        history.append(&movement, "t2");

        assert_eq!(
            format_history_page(&history.page(1, 10), &catalog),
            "**Stock History** (page 1/1, 2 entries)\n\
             `#2` Product 2: 3 packets (export)\n  t2\n\
             `#1` Product 2: 3 packets (export)\n  t1\n"
        );
    }

    #[test]
    fn test_format_outcome() {
        let catalog = Catalog::builtin();
        let product = catalog.get(1).unwrap();

        let text = format_outcome(&Outcome::Applied(entry("")), product);
        assert!(text.contains("10 bags (import)"));
        assert!(text.contains("History ID: 1"));

        assert_eq!(
            format_outcome(&Outcome::Ignored, product),
            "Nothing recorded for Product 1."
        );
        assert!(format_deletion(true).contains("not changed"));
        assert!(format_deletion(false).starts_with("No history"));
    }
}
