//! Movement types - validated import/export requests.
//!
//! A movement is only ever built from a [`Quantity`] that has already been
//! validated, so the ledger and history never see a zero or negative amount.

use crate::{
    core::stock::UnitType,
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::{fmt, num::NonZeroU64};

/// A strictly positive movement quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Quantity(NonZeroU64);

impl Quantity {
    /// Returns `None` for zero.
    #[must_use]
    pub const fn new(value: u64) -> Option<Self> {
        match NonZeroU64::new(value) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Parses user input. Surrounding whitespace is ignored; anything that is
    /// not a positive base-10 integer is rejected.
    ///
    /// # Errors
    /// Returns `Error::InvalidQuantity` for empty, non-numeric, fractional,
    /// zero, or negative input.
    pub fn parse(input: &str) -> Result<Self> {
        input
            .trim()
            .parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| Error::InvalidQuantity {
                input: input.to_string(),
            })
    }

    /// The quantity as a plain integer.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for Quantity {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self> {
        Self::new(value).ok_or_else(|| Error::InvalidQuantity {
            input: value.to_string(),
        })
    }
}

impl From<Quantity> for u64 {
    fn from(value: Quantity) -> Self {
        value.get()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementAction {
    /// Stock coming in
    Import,
    /// Stock going out
    Export,
}

impl MovementAction {
    /// Lowercase name as stored and displayed.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::Export => "export",
        }
    }
}

impl fmt::Display for MovementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload shared by both movement directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementDetails {
    /// Product being moved
    pub product_id: i64,
    /// Unit type being moved
    pub unit: UnitType,
    /// How many units
    pub quantity: Quantity,
    /// Free-text note, empty when none was given
    pub note: String,
}

/// An import or export of one product's stock in one unit type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Movement {
    /// Adds stock
    Import(MovementDetails),
    /// Removes stock
    Export(MovementDetails),
}

impl Movement {
    /// Builds a movement for the given direction.
    #[must_use]
    pub fn new(action: MovementAction, details: MovementDetails) -> Self {
        match action {
            MovementAction::Import => Self::Import(details),
            MovementAction::Export => Self::Export(details),
        }
    }

    /// Direction of this movement.
    #[must_use]
    pub const fn action(&self) -> MovementAction {
        match self {
            Self::Import(_) => MovementAction::Import,
            Self::Export(_) => MovementAction::Export,
        }
    }

    /// The shared payload.
    #[must_use]
    pub const fn details(&self) -> &MovementDetails {
        match self {
            Self::Import(d) | Self::Export(d) => d,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(Quantity::parse("10").unwrap().get(), 10);
        assert_eq!(Quantity::parse("  7 ").unwrap().get(), 7);

        for bad in ["0", "-5", "", "   ", "abc", "2.5", "1e3"] {
            assert!(
                matches!(Quantity::parse(bad), Err(Error::InvalidQuantity { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_quantity_rejects_zero_on_deserialize() {
        let q: Quantity = serde_json::from_str("4").unwrap();
        assert_eq!(q.get(), 4);
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("-1").is_err());
    }

    #[test]
    fn test_movement_action_names() {
        assert_eq!(MovementAction::Import.to_string(), "import");
        assert_eq!(MovementAction::Export.to_string(), "export");
        assert_eq!(
            serde_json::from_str::<MovementAction>(r#""export""#).unwrap(),
            MovementAction::Export
        );
        assert!(serde_json::from_str::<MovementAction>(r#""transfer""#).is_err());
    }

    #[test]
    fn test_movement_accessors() {
        let details = MovementDetails {
            product_id: 1,
            unit: UnitType::Cartons,
            quantity: Quantity::new(2).unwrap(),
            note: String::new(),
        };
        let movement = Movement::new(MovementAction::Export, details.clone());
        assert_eq!(movement.action(), MovementAction::Export);
        assert_eq!(movement.details(), &details);
    }
}
