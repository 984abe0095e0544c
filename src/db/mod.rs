use crate::config::DatabaseConfig;
use crate::entities::users;
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::{debug, info};

pub mod repositories;

pub use repositories::user::NewUserRow;

/// A single connection to the inventario database.
///
/// The pool is capped at one connection: every invocation of the tool opens
/// its own `Store` and closes it when the operation is done.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.connect_timeout_seconds);

        let mut opt = ConnectOptions::new(config.connection_url());
        opt.max_connections(1)
            .min_connections(1)
            .connect_timeout(timeout)
            .acquire_timeout(timeout)
            .sqlx_logging(false);

        let conn = Database::connect(opt)
            .await
            .with_context(|| format!("Failed to connect to {}", config.redacted_url()))?;

        info!("Database connected ({})", config.redacted_url());

        Ok(Self { conn })
    }

    pub async fn close(self) -> Result<()> {
        self.conn
            .close()
            .await
            .context("Failed to close database connection")?;
        debug!("Database connection closed");
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn shift_repo(&self) -> repositories::shift::ShiftRepository {
        repositories::shift::ShiftRepository::new(self.conn.clone())
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        self.user_repo().exists(username).await
    }

    pub async fn create_user(&self, user: &NewUserRow<'_>) -> Result<users::Model> {
        self.user_repo().create(user).await
    }

    pub async fn list_users(&self) -> Result<Vec<users::Model>> {
        self.user_repo().list().await
    }

    pub async fn shift_exists(&self, id: i32) -> Result<bool> {
        self.shift_repo().exists(id).await
    }

    pub async fn list_shifts(&self) -> Result<Vec<crate::entities::shifts::Model>> {
        self.shift_repo().list().await
    }
}
