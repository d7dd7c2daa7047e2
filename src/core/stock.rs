//! Stock ledger - on-hand quantity per product and unit type.
//!
//! Levels are unsigned, so the "never negative" rule is enforced by the type
//! and by [`StockLedger::apply`] refusing exports that exceed what is on hand.

use crate::{
    core::movement::{Movement, MovementAction, Quantity},
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};
use tracing::debug;

/// Granularity stock is counted in. Each unit type is tracked independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    /// Bags (the default selection)
    #[default]
    Bags,
    /// Packets
    Packets,
    /// Cartons
    Cartons,
}

impl UnitType {
    /// Every unit type, in display order.
    pub const ALL: [Self; 3] = [Self::Bags, Self::Packets, Self::Cartons];

    /// Lowercase name as stored and displayed.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bags => "bags",
            Self::Packets => "packets",
            Self::Cartons => "cartons",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidUnitType {
                value: s.to_string(),
            })
    }
}

/// On-hand quantities of one product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    /// Bags on hand
    pub bags: u64,
    /// Packets on hand
    pub packets: u64,
    /// Cartons on hand
    pub cartons: u64,
}

impl StockRecord {
    /// Quantity on hand for `unit`.
    #[must_use]
    pub const fn get(&self, unit: UnitType) -> u64 {
        match unit {
            UnitType::Bags => self.bags,
            UnitType::Packets => self.packets,
            UnitType::Cartons => self.cartons,
        }
    }

    const fn get_mut(&mut self, unit: UnitType) -> &mut u64 {
        match unit {
            UnitType::Bags => &mut self.bags,
            UnitType::Packets => &mut self.packets,
            UnitType::Cartons => &mut self.cartons,
        }
    }

    /// `(unit, quantity)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (UnitType, u64)> + '_ {
        UnitType::ALL.into_iter().map(|unit| (unit, self.get(unit)))
    }
}

/// Stock levels for every product that has seen at least one accepted
/// movement. Products without a record hold zero of everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockLedger {
    records: BTreeMap<i64, StockRecord>,
}

impl StockLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for `product_id`, if one was ever created.
    #[must_use]
    pub fn record(&self, product_id: i64) -> Option<&StockRecord> {
        self.records.get(&product_id)
    }

    /// The levels for `product_id`; all-zero if no record exists.
    #[must_use]
    pub fn levels(&self, product_id: i64) -> StockRecord {
        self.records.get(&product_id).copied().unwrap_or_default()
    }

    /// Quantity on hand for one product and unit type.
    #[must_use]
    pub fn quantity(&self, product_id: i64, unit: UnitType) -> u64 {
        self.levels(product_id).get(unit)
    }

    /// Whether an export of `unit` should be offered at all. This only looks at
    /// the current level, not at any requested quantity.
    #[must_use]
    pub fn export_enabled(&self, product_id: i64, unit: UnitType) -> bool {
        self.quantity(product_id, unit) > 0
    }

    /// All records, ordered by product id.
    pub fn records(&self) -> impl Iterator<Item = (i64, &StockRecord)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    /// Applies a movement and returns the new level for its product and unit.
    ///
    /// Imports always succeed. Exports succeed only when the level covers the
    /// requested quantity. On failure the ledger is left untouched; in
    /// particular a rejected export never creates a record.
    ///
    /// # Errors
    /// Returns `Error::InsufficientStock` when an export exceeds the level, and
    /// `Error::QuantityOverflow` if an import would not fit in the counter.
    pub fn apply(&mut self, movement: &Movement) -> Result<u64> {
        let details = movement.details();
        let current = self.quantity(details.product_id, details.unit);
        let next = match movement.action() {
            MovementAction::Import => Self::checked_import(current, details.quantity)?,
            MovementAction::Export => {
                let requested = details.quantity.get();
                if current < requested {
                    return Err(Error::InsufficientStock {
                        product_id: details.product_id,
                        unit: details.unit,
                        available: current,
                        requested,
                    });
                }
                current - requested
            }
        };

        *self
            .records
            .entry(details.product_id)
            .or_default()
            .get_mut(details.unit) = next;

        debug!(
            product_id = details.product_id,
            unit = %details.unit,
            action = %movement.action(),
            quantity = details.quantity.get(),
            level = next,
            "Applied movement to ledger"
        );
        Ok(next)
    }

    fn checked_import(current: u64, quantity: Quantity) -> Result<u64> {
        current
            .checked_add(quantity.get())
            .ok_or(Error::QuantityOverflow)
    }
}
