//! Unified error type for `StockBuddy`.
//!
//! Every fallible operation in the crate returns [`Result`]. Ledger rule
//! violations (`InvalidQuantity`, `InsufficientStock`) are ordinary variants so
//! the core can report them, but the command handlers turn them into outcomes
//! instead of propagating them; only store and framework failures bubble up.

use crate::core::stock::UnitType;
use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Database driver or query failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Invalid or unreadable configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Required environment variable missing or not unicode.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failure while writing to the store.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Quantity input that is not a positive integer.
    #[error("Invalid quantity: {input:?}")]
    InvalidQuantity {
        /// The raw input that was rejected
        input: String,
    },

    /// Export larger than the on-hand quantity.
    #[error("Not enough stock! Product {product_id} has {available} {unit}, requested {requested}")]
    InsufficientStock {
        /// Product the export was requested for
        product_id: i64,
        /// Unit type of the export
        unit: UnitType,
        /// Quantity on hand before the export
        available: u64,
        /// Quantity requested
        requested: u64,
    },

    /// A persisted value could not be decoded.
    #[error("Persisted data under key '{key}' is corrupt: {message}")]
    PersistedDataCorrupt {
        /// Store key the value was read from
        key: String,
        /// Decoder message
        message: String,
    },

    /// Product is not part of the catalog.
    #[error("Product not found: {name}")]
    ProductNotFound {
        /// Name or id that was looked up
        name: String,
    },

    /// Unit type text that does not name a known unit.
    #[error("Invalid unit type: {value}")]
    InvalidUnitType {
        /// The rejected text
        value: String,
    },

    /// Import would overflow the stock counter.
    #[error("Stock quantity overflow")]
    QuantityOverflow,

    /// Serenity/Poise framework error.
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
