//! Shared fixtures: a throwaway SQLite database with the `shifts` and
//! `users` tables the inventario API normally owns.

use std::ops::Deref;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use inventario_users::config::{DatabaseConfig, SecurityConfig};
use inventario_users::db::Store;
use inventario_users::entities::{prelude::*, shifts};
use inventario_users::services::SeaOrmUserProvisioner;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Schema, Set};

/// Connection settings for a SQLite file that is deleted on drop.
pub struct TestDatabase {
    config: DatabaseConfig,
    path: PathBuf,
}

impl TestDatabase {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Deref for TestDatabase {
    type Target = DatabaseConfig;

    fn deref(&self) -> &Self::Target {
        &self.config
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut path = self.path.clone().into_os_string();
            path.push(suffix);
            let _ = std::fs::remove_file(path);
        }
    }
}

pub async fn setup_database() -> TestDatabase {
    let db_path = std::env::temp_dir().join(format!(
        "inventario-users-test-{}.db",
        uuid::Uuid::new_v4()
    ));

    let database = DatabaseConfig {
        url: Some(format!("sqlite://{}?mode=rwc", db_path.display())),
        ..DatabaseConfig::default()
    };

    let store = Store::connect(&database)
        .await
        .expect("failed to open test database");

    let backend = store.conn.get_database_backend();
    let schema = Schema::new(backend);
    for stmt in [
        schema.create_table_from_entity(Shifts),
        schema.create_table_from_entity(Users),
    ] {
        store
            .conn
            .execute(backend.build(&stmt))
            .await
            .expect("failed to create test table");
    }

    store.close().await.expect("failed to close test database");
    TestDatabase {
        config: database,
        path: db_path,
    }
}

pub async fn seed_shift(database: &DatabaseConfig, code: &str, start: u32, end: u32) -> i32 {
    let store = Store::connect(database).await.unwrap();
    let shift = shifts::ActiveModel {
        code: Set(code.to_string()),
        start_time: Set(NaiveTime::from_hms_opt(start, 0, 0).unwrap()),
        end_time: Set(NaiveTime::from_hms_opt(end, 0, 0).unwrap()),
        ..Default::default()
    }
    .insert(&store.conn)
    .await
    .expect("failed to seed shift");
    store.close().await.unwrap();
    shift.id
}

pub async fn count_users(database: &DatabaseConfig) -> usize {
    let store = Store::connect(database).await.unwrap();
    let users = Users::find().all(&store.conn).await.unwrap();
    store.close().await.unwrap();
    users.len()
}

/// Lowest bcrypt cost keeps the suite fast.
pub fn fast_security() -> SecurityConfig {
    SecurityConfig {
        bcrypt_cost: 4,
        ..SecurityConfig::default()
    }
}

pub fn provisioner(database: &DatabaseConfig) -> SeaOrmUserProvisioner {
    SeaOrmUserProvisioner::new(database.clone(), fast_security())
}
