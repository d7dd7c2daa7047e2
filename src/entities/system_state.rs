//! System state entity - Generic string key-value table.
//!
//! Backs the persisted store: each row holds one opaque value (a JSON document
//! for the `stocks` and `history` keys) that is overwritten as a whole on every
//! mutation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// System state database model - stores key-value pairs
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "system_state")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Store key (e.g., `"stocks"`, `"history"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Opaque value stored as text
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this value was last written
    pub updated_at: DateTime,
}

/// `SystemState` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
