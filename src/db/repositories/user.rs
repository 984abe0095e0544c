use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use tracing::{debug, warn};

use crate::entities::{prelude::*, users};

/// Column values for a new `users` row. `id` and `created_at` are assigned
/// by the database.
#[derive(Debug, Clone)]
pub struct NewUserRow<'a> {
    pub username: &'a str,
    pub full_name: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub shift_id: Option<i32>,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn exists(&self, username: &str) -> Result<bool> {
        let count = Users::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.conn)
            .await
            .context("Failed to query user by username")?;

        debug!(username, count, "Checked username");
        Ok(count > 0)
    }

    /// Inserts the row in its own transaction and returns it as stored.
    ///
    /// The transaction is rolled back when the insert fails, including on a
    /// unique or foreign key violation.
    pub async fn create(&self, user: &NewUserRow<'_>) -> Result<users::Model> {
        let txn = self
            .conn
            .begin()
            .await
            .context("Failed to begin transaction")?;

        match Self::insert_returning(&txn, user).await {
            Ok(model) => {
                txn.commit()
                    .await
                    .context("Failed to commit user insert")?;
                Ok(model)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    warn!("Rollback after failed insert also failed: {rollback_err}");
                }
                Err(e)
            }
        }
    }

    async fn insert_returning<C: ConnectionTrait>(
        conn: &C,
        user: &NewUserRow<'_>,
    ) -> Result<users::Model> {
        let mut insert = Query::insert();
        insert
            .into_table(Users)
            .columns([
                users::Column::Username,
                users::Column::FullName,
                users::Column::PasswordHash,
                users::Column::Role,
                users::Column::ShiftId,
                users::Column::CreatedAt,
            ])
            .values([
                user.username.into(),
                user.full_name.into(),
                user.password_hash.into(),
                user.role.into(),
                user.shift_id.into(),
                Expr::current_timestamp().into(),
            ])
            .context("Failed to build user insert")?
            .returning_all();

        let stmt = conn.get_database_backend().build(&insert);

        Users::find()
            .from_raw_sql(stmt)
            .one(conn)
            .await
            .context("Failed to insert user")?
            .ok_or_else(|| anyhow::anyhow!("Insert returned no row for '{}'", user.username))
    }

    pub async fn list(&self) -> Result<Vec<users::Model>> {
        Users::find()
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users")
    }
}

/// Hash a password with bcrypt at the given cost.
///
/// CPU-bound; async callers should run it through `spawn_blocking`.
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost).map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))
}
