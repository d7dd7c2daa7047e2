//! Entity module - `SeaORM` entity definitions for the database.
//!
//! The tracker only needs a single key-value table; everything else lives in
//! the JSON documents stored in it.

pub mod system_state;

pub use system_state::Entity as SystemState;
