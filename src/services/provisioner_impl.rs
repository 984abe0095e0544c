//! `SeaORM` implementation of the `UserProvisioner` trait.

use crate::config::{DatabaseConfig, SecurityConfig};
use crate::db::repositories::user::hash_password;
use crate::db::{NewUserRow, Store};
use crate::models::{Shift, User};
use crate::services::provisioner::{NewUser, ProvisionError, UserProvisioner, ValidatedUser};
use async_trait::async_trait;
use tokio::task;
use tracing::{debug, info, warn};

/// Opens one connection per operation and closes it before returning,
/// whether the operation succeeded or not.
pub struct SeaOrmUserProvisioner {
    database: DatabaseConfig,
    security: SecurityConfig,
}

impl SeaOrmUserProvisioner {
    #[must_use]
    pub const fn new(database: DatabaseConfig, security: SecurityConfig) -> Self {
        Self { database, security }
    }

    async fn open_store(&self) -> Result<Store, ProvisionError> {
        Store::connect(&self.database).await.map_err(|e| {
            debug!("Database connection failed: {e:#}");
            ProvisionError::from(e)
        })
    }

    async fn close_store(store: Store) {
        if let Err(e) = store.close().await {
            warn!("{e:#}");
        }
    }

    async fn insert_checked(
        store: &Store,
        user: &ValidatedUser,
        password_hash: &str,
    ) -> Result<User, ProvisionError> {
        if store.username_exists(&user.username).await? {
            return Err(ProvisionError::Conflict(user.username.clone()));
        }

        if let Some(shift_id) = user.shift_id
            && !store.shift_exists(shift_id).await?
        {
            return Err(ProvisionError::NotFound(shift_id));
        }

        let row = NewUserRow {
            username: &user.username,
            full_name: &user.full_name,
            password_hash,
            role: user.role.as_str(),
            shift_id: user.shift_id,
        };

        let model = store
            .create_user(&row)
            .await
            .map_err(|e| ProvisionError::from_insert(&e, &user.username, user.shift_id))?;

        info!(
            user_id = model.id,
            username = %model.username,
            role = %model.role,
            "User created"
        );

        Ok(User::from(model))
    }
}

#[async_trait]
impl UserProvisioner for SeaOrmUserProvisioner {
    async fn create_user(&self, request: NewUser) -> Result<User, ProvisionError> {
        let user = request.validate(self.security.min_password_length)?;

        // bcrypt is CPU-bound, keep it off the async thread
        let password = user.password.clone();
        let cost = self.security.bcrypt_cost;
        let password_hash = task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| ProvisionError::Persistence(format!("Password hashing task failed: {e}")))??;

        let store = self.open_store().await?;
        let result = Self::insert_checked(&store, &user, &password_hash).await;
        Self::close_store(store).await;

        if let Err(e) = &result {
            info!(username = %user.username, "User not created: {e}");
        }

        result
    }

    async fn list_shifts(&self) -> Result<Vec<Shift>, ProvisionError> {
        let store = self.open_store().await?;
        let result = store.list_shifts().await;
        Self::close_store(store).await;

        Ok(result?.into_iter().map(Shift::from).collect())
    }

    async fn list_users(&self) -> Result<Vec<User>, ProvisionError> {
        let store = self.open_store().await?;
        let result = store.list_users().await;
        Self::close_store(store).await;

        Ok(result?.into_iter().map(User::from).collect())
    }
}
