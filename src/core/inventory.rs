//! Inventory state and command handlers.
//!
//! [`Inventory`] is treated as an immutable value. Every handler borrows the
//! current state and returns a [`Transition`] holding the next state, what
//! happened, and the side effects the caller has to carry out (persisting,
//! clearing inputs, showing errors). Handlers never perform I/O themselves.

use crate::{
    core::{
        history::{History, HistoryEntry},
        movement::{Movement, MovementAction, MovementDetails, Quantity},
        stock::{StockLedger, UnitType},
    },
    errors::{Error, Result},
};
use std::collections::BTreeMap;
use tracing::debug;

/// Message shown for a product after a rejected export.
pub const NOT_ENOUGH_STOCK: &str = "Not enough stock!";

/// Transient per-product input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    /// Quantity exactly as typed
    pub quantity: String,
    /// Selected unit type
    pub unit: UnitType,
    /// Optional note
    pub note: String,
}

/// Side effect requested by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write the full stock ledger to the store
    PersistStock,
    /// Write the full history to the store
    PersistHistory,
    /// Clear the product's quantity and note inputs
    ClearInput {
        /// Product whose inputs were cleared
        product_id: i64,
    },
    /// Show an error message next to the product
    ShowError {
        /// Product the message belongs to
        product_id: i64,
        /// Message text
        message: String,
    },
    /// Remove any error message shown for the product
    ClearError {
        /// Product whose message was cleared
        product_id: i64,
    },
}

/// What a handler did.
#[derive(Debug)]
pub enum Outcome {
    /// Input-only change; nothing was recorded
    Edited,
    /// Movement accepted and recorded
    Applied(HistoryEntry),
    /// Movement refused; carries the reason (`Error::InsufficientStock`)
    Rejected(Error),
    /// Quantity was not a positive integer; silently ignored
    Ignored,
    /// History deletion; `true` if an entry was removed
    Deleted(bool),
}

/// Result of a command handler.
#[derive(Debug)]
pub struct Transition {
    /// State after the command
    pub state: Inventory,
    /// What happened
    pub outcome: Outcome,
    /// Side effects to carry out, in order
    pub effects: Vec<Effect>,
}

/// Complete in-memory state of the tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    stock: StockLedger,
    history: History,
    drafts: BTreeMap<i64, Draft>,
    errors: BTreeMap<i64, String>,
}

impl Inventory {
    /// Builds state from persisted collections. Drafts and error messages
    /// always start empty.
    #[must_use]
    pub fn new(stock: StockLedger, history: History) -> Self {
        Self {
            stock,
            history,
            drafts: BTreeMap::new(),
            errors: BTreeMap::new(),
        }
    }

    /// Current stock levels.
    #[must_use]
    pub const fn stock(&self) -> &StockLedger {
        &self.stock
    }

    /// Current history.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Input fields for a product (defaults if never edited).
    #[must_use]
    pub fn draft(&self, product_id: i64) -> Draft {
        self.drafts.get(&product_id).cloned().unwrap_or_default()
    }

    /// Error message currently shown for a product.
    #[must_use]
    pub fn error(&self, product_id: i64) -> Option<&str> {
        self.errors.get(&product_id).map(String::as_str)
    }

    /// Whether export is offered for the product's currently selected unit.
    #[must_use]
    pub fn export_enabled(&self, product_id: i64) -> bool {
        self.stock
            .export_enabled(product_id, self.draft(product_id).unit)
    }

    /// Replaces the typed quantity.
    #[must_use]
    pub fn edit_quantity(&self, product_id: i64, text: impl Into<String>) -> Transition {
        let text = text.into();
        self.edit_draft(product_id, |draft| draft.quantity = text)
    }

    /// Selects a unit type.
    #[must_use]
    pub fn select_unit(&self, product_id: i64, unit: UnitType) -> Transition {
        self.edit_draft(product_id, |draft| draft.unit = unit)
    }

    /// Replaces the note.
    #[must_use]
    pub fn edit_note(&self, product_id: i64, text: impl Into<String>) -> Transition {
        let text = text.into();
        self.edit_draft(product_id, |draft| draft.note = text)
    }

    fn edit_draft(&self, product_id: i64, edit: impl FnOnce(&mut Draft)) -> Transition {
        let mut state = self.clone();
        edit(state.drafts.entry(product_id).or_default());
        Transition {
            state,
            outcome: Outcome::Edited,
            effects: Vec::new(),
        }
    }

    /// Applies the product's draft as an import or export.
    ///
    /// * Quantity not a positive integer: state unchanged, [`Outcome::Ignored`].
    /// * Export above the on-hand level: stock and history unchanged, the
    ///   product gets [`NOT_ENOUGH_STOCK`], [`Outcome::Rejected`].
    /// * Otherwise: ledger adjusted, one history entry prepended, quantity and
    ///   note cleared (unit kept), error cleared, [`Outcome::Applied`].
    ///
    /// # Errors
    /// Returns `Error::QuantityOverflow` if an import would overflow the
    /// counter; the state is left unchanged in that case.
    pub fn submit(
        &self,
        product_id: i64,
        action: MovementAction,
        captured_at: &str,
    ) -> Result<Transition> {
        let draft = self.draft(product_id);

        let quantity = match Quantity::parse(&draft.quantity) {
            Ok(q) => q,
            Err(e) => {
                debug!(product_id, %action, error = %e, "Ignoring movement");
                return Ok(Transition {
                    state: self.clone(),
                    outcome: Outcome::Ignored,
                    effects: Vec::new(),
                });
            }
        };

        let movement = Movement::new(
            action,
            MovementDetails {
                product_id,
                unit: draft.unit,
                quantity,
                note: draft.note,
            },
        );

        let mut state = self.clone();
        match state.stock.apply(&movement) {
            Ok(_) => {
                let entry = state.history.append(&movement, captured_at);
                if let Some(draft) = state.drafts.get_mut(&product_id) {
                    draft.quantity.clear();
                    draft.note.clear();
                }
                state.errors.remove(&product_id);

                Ok(Transition {
                    state,
                    outcome: Outcome::Applied(entry),
                    effects: vec![
                        Effect::PersistStock,
                        Effect::PersistHistory,
                        Effect::ClearInput { product_id },
                        Effect::ClearError { product_id },
                    ],
                })
            }
            Err(e @ Error::InsufficientStock { .. }) => {
                state
                    .errors
                    .insert(product_id, NOT_ENOUGH_STOCK.to_string());

                Ok(Transition {
                    state,
                    outcome: Outcome::Rejected(e),
                    effects: vec![Effect::ShowError {
                        product_id,
                        message: NOT_ENOUGH_STOCK.to_string(),
                    }],
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Removes a history entry. Stock is not adjusted.
    #[must_use]
    pub fn delete_history(&self, id: u64) -> Transition {
        let mut state = self.clone();
        let removed = state.history.delete(id);
        let effects = if removed {
            vec![Effect::PersistHistory]
        } else {
            Vec::new()
        };

        Transition {
            state,
            outcome: Outcome::Deleted(removed),
            effects,
        }
    }
}
