//! Database-backed [`KeyValueStore`] over the `system_state` table.

use super::KeyValueStore;
use crate::{
    entities::{SystemState, system_state},
    errors::Result,
};
use async_trait::async_trait;
use sea_orm::{Set, prelude::*};
use tracing::{debug, instrument};

/// A [`KeyValueStore`] persisting each key as one row of `system_state`.
#[derive(Debug, Clone)]
pub struct DatabaseStore {
    db: DatabaseConnection,
}

impl DatabaseStore {
    /// Wraps an open database connection. Tables must already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl KeyValueStore for DatabaseStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = SystemState::find()
            .filter(system_state::Column::Key.eq(key))
            .one(&self.db)
            .await?;
        debug!(found = row.is_some(), "Read store key");
        Ok(row.map(|r| r.value))
    }

    #[instrument(skip(self, value), fields(len = value.len()))]
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().naive_utc();

        let existing = SystemState::find()
            .filter(system_state::Column::Key.eq(key))
            .one(&self.db)
            .await?;

        if let Some(row) = existing {
            let mut active: system_state::ActiveModel = row.into();
            active.value = Set(value.to_string());
            active.updated_at = Set(now);
            active.update(&self.db).await?;
        } else {
            let row = system_state::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                updated_at: Set(now),
                ..Default::default()
            };
            row.insert(&self.db).await?;
        }

        debug!("Wrote store key");
        Ok(())
    }
}
