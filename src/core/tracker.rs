//! Tracker - the stateful shell around [`Inventory`].
//!
//! The tracker owns the catalog, the current state, and the store. It feeds
//! user actions to the pure handlers in [`crate::core::inventory`], swaps in
//! the resulting state, and carries out the requested effects. Persisting is
//! the only effect that does I/O; the others are presentation hints and are
//! just logged here.

use crate::{
    core::{
        inventory::{Effect, Inventory, Outcome, Transition},
        movement::MovementAction,
        persistence,
        product::{Catalog, Product},
        stock::{StockRecord, UnitType},
    },
    errors::{Error, Result},
    store::KeyValueStore,
};
use chrono::{DateTime, Local, TimeZone};
use tracing::{debug, info, instrument, warn};

/// Formats a capture time as e.g. `10/19/2026, 3:04:05 PM`.
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Current local time in the history timestamp format.
#[must_use]
pub fn local_timestamp() -> String {
    format_timestamp(&Local::now())
}

/// Owns the inventory state and writes it back to the store.
#[derive(Debug)]
pub struct Tracker<S> {
    store: S,
    catalog: Catalog,
    inventory: Inventory,
    clock: fn() -> String,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Loads persisted state from `store`.
    ///
    /// # Errors
    /// Returns an error only if the store cannot be read; unreadable values are
    /// replaced with empty collections.
    #[instrument(skip(store, catalog))]
    pub async fn load(store: S, catalog: Catalog) -> Result<Self> {
        let inventory = persistence::load_inventory(&store).await?;
        info!(
            products = catalog.products().len(),
            history_entries = inventory.history().len(),
            "Tracker loaded"
        );
        Ok(Self {
            store,
            catalog,
            inventory,
            clock: local_timestamp,
        })
    }

    /// Replaces the clock used to stamp history entries.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> String) -> Self {
        self.clock = clock;
        self
    }

    /// The product catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current state.
    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Stock levels for a product (all-zero if it has no record).
    #[must_use]
    pub fn stock_for(&self, product_id: i64) -> StockRecord {
        self.inventory.stock().levels(product_id)
    }

    /// Whether an export of `unit` is currently offered for the product.
    #[must_use]
    pub fn export_enabled(&self, product_id: i64, unit: UnitType) -> bool {
        self.inventory.stock().export_enabled(product_id, unit)
    }

    /// Error message currently shown for the product.
    #[must_use]
    pub fn error_for(&self, product_id: i64) -> Option<&str> {
        self.inventory.error(product_id)
    }

    fn product(&self, product_id: i64) -> Result<&Product> {
        self.catalog
            .get(product_id)
            .ok_or_else(|| Error::ProductNotFound {
                name: product_id.to_string(),
            })
    }

    /// Sets the typed quantity for a product.
    ///
    /// # Errors
    /// Returns `Error::ProductNotFound` for ids outside the catalog.
    pub fn set_quantity(&mut self, product_id: i64, text: &str) -> Result<()> {
        self.product(product_id)?;
        self.inventory = self.inventory.edit_quantity(product_id, text).state;
        Ok(())
    }

    /// Selects the unit type for a product.
    ///
    /// # Errors
    /// Returns `Error::ProductNotFound` for ids outside the catalog.
    pub fn select_unit(&mut self, product_id: i64, unit: UnitType) -> Result<()> {
        self.product(product_id)?;
        self.inventory = self.inventory.select_unit(product_id, unit).state;
        Ok(())
    }

    /// Sets the note for a product.
    ///
    /// # Errors
    /// Returns `Error::ProductNotFound` for ids outside the catalog.
    pub fn set_note(&mut self, product_id: i64, text: &str) -> Result<()> {
        self.product(product_id)?;
        self.inventory = self.inventory.edit_note(product_id, text).state;
        Ok(())
    }

    /// Submits the product's current inputs as a movement.
    ///
    /// # Errors
    /// Returns `Error::ProductNotFound` for ids outside the catalog, and store
    /// errors if persisting the new state fails.
    #[instrument(skip(self))]
    pub async fn submit(&mut self, product_id: i64, action: MovementAction) -> Result<Outcome> {
        self.product(product_id)?;
        let captured_at = (self.clock)();
        let transition = self.inventory.submit(product_id, action, &captured_at)?;
        self.commit(transition).await
    }

    /// Fills in all inputs for a product and submits them in one step.
    ///
    /// # Errors
    /// Same as [`Tracker::submit`].
    pub async fn record(
        &mut self,
        product_id: i64,
        action: MovementAction,
        quantity: &str,
        unit: UnitType,
        note: &str,
    ) -> Result<Outcome> {
        self.set_quantity(product_id, quantity)?;
        self.select_unit(product_id, unit)?;
        self.set_note(product_id, note)?;
        self.submit(product_id, action).await
    }

    /// Deletes a history entry. Stock levels are not adjusted.
    ///
    /// # Errors
    /// Returns store errors if persisting the history fails.
    #[instrument(skip(self))]
    pub async fn delete_history(&mut self, id: u64) -> Result<bool> {
        let transition = self.inventory.delete_history(id);
        match self.commit(transition).await? {
            Outcome::Deleted(removed) => Ok(removed),
            _ => Ok(false),
        }
    }

    async fn commit(&mut self, transition: Transition) -> Result<Outcome> {
        let Transition {
            state,
            outcome,
            effects,
        } = transition;
        self.inventory = state;

        for effect in effects {
            match effect {
                Effect::PersistStock => {
                    persistence::save_stock(&self.store, self.inventory.stock()).await?;
                }
                Effect::PersistHistory => {
                    persistence::save_history(&self.store, self.inventory.history()).await?;
                }
                Effect::ClearInput { product_id } => {
                    debug!(product_id, "Cleared inputs");
                }
                Effect::ShowError {
                    product_id,
                    message,
                } => {
                    warn!(product_id, %message, "Movement rejected");
                }
                Effect::ClearError { product_id } => {
                    debug!(product_id, "Cleared error");
                }
            }
        }

        Ok(outcome)
    }
}
