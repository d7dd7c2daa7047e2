//! Core business logic - framework-agnostic stock and history operations.

/// Movement history (audit trail)
pub mod history;
/// Inventory state and command handlers
pub mod inventory;
/// Validated import/export movements
pub mod movement;
/// Store load/save of the ledger and history
pub mod persistence;
/// Product catalog
pub mod product;
/// Text rendering for the bot layer
pub mod report;
/// Stock ledger and unit types
pub mod stock;
/// Stateful shell that executes command effects
pub mod tracker;
