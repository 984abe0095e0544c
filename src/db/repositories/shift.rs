use crate::entities::{prelude::*, shifts};
use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

/// Read-only access to the `shifts` reference table
pub struct ShiftRepository {
    conn: DatabaseConnection,
}

impl ShiftRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn exists(&self, id: i32) -> Result<bool> {
        let shift = Shifts::find_by_id(id)
            .one(&self.conn)
            .await
            .with_context(|| format!("Failed to query shift {id}"))?;

        Ok(shift.is_some())
    }

    pub async fn list(&self) -> Result<Vec<shifts::Model>> {
        Shifts::find()
            .order_by_asc(shifts::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list shifts")
    }
}
