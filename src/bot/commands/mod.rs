//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Movement history commands
pub mod history;

/// Stock level and movement commands
pub mod stock;

// Export commands
pub use general::*;
pub use history::*;
pub use stock::*;
