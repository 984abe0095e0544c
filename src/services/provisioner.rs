//! Domain service for provisioning inventario users.
//!
//! Validates the request, hashes the password and writes the `users` row.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::models::{Role, Shift, User, derive_full_name};

/// Errors specific to user provisioning.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("User '{0}' already exists")]
    Conflict(String),

    #[error("Shift ID {0} does not exist")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Persistence(String),
}

impl ProvisionError {
    /// Maps a failed insert: constraint violations become `Conflict` or
    /// `NotFound`, anything else is a `Persistence` error.
    #[must_use]
    pub fn from_insert(err: &anyhow::Error, username: &str, shift_id: Option<i32>) -> Self {
        let sql_err = err.downcast_ref::<DbErr>().and_then(DbErr::sql_err);

        match (sql_err, shift_id) {
            (Some(SqlErr::UniqueConstraintViolation(_)), _) => Self::Conflict(username.to_string()),
            (Some(SqlErr::ForeignKeyConstraintViolation(_)), Some(id)) => Self::NotFound(id),
            _ => Self::Persistence(format!("{err:#}")),
        }
    }
}

impl From<anyhow::Error> for ProvisionError {
    fn from(err: anyhow::Error) -> Self {
        Self::Persistence(format!("{err:#}"))
    }
}

impl From<DbErr> for ProvisionError {
    fn from(err: DbErr) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Raw request as typed on the command line.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub role: String,
    pub shift_id: Option<i32>,
}

/// A request that passed every check that needs no database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUser {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
    pub shift_id: Option<i32>,
}

impl NewUser {
    /// Checks username, role and password length, and fills in the full
    /// name when it is missing or blank. The username is kept exactly as
    /// typed; only a blank one is rejected.
    pub fn validate(self, min_password_length: usize) -> Result<ValidatedUser, ProvisionError> {
        if self.username.trim().is_empty() {
            return Err(ProvisionError::Validation(
                "Username cannot be empty".to_string(),
            ));
        }

        let role: Role = self
            .role
            .parse()
            .map_err(|e: crate::models::UnknownRole| ProvisionError::Validation(e.to_string()))?;

        if self.password.chars().count() < min_password_length {
            return Err(ProvisionError::Validation(format!(
                "Password must be at least {min_password_length} characters long"
            )));
        }

        let full_name = match self.full_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => derive_full_name(self.username.trim()),
        };

        Ok(ValidatedUser {
            username: self.username,
            password: self.password,
            full_name,
            role,
            shift_id: self.shift_id,
        })
    }
}

/// Domain service trait for user provisioning.
#[async_trait::async_trait]
pub trait UserProvisioner: Send + Sync {
    /// Creates a user and returns the stored record.
    ///
    /// # Errors
    ///
    /// - [`ProvisionError::Validation`] before any database access for a bad
    ///   role, short password or empty username.
    /// - [`ProvisionError::Conflict`] if the username is taken.
    /// - [`ProvisionError::NotFound`] if `shift_id` names no shift.
    /// - [`ProvisionError::Persistence`] on connection or transaction failure.
    async fn create_user(&self, request: NewUser) -> Result<User, ProvisionError>;

    /// All shifts ordered by id.
    async fn list_shifts(&self) -> Result<Vec<Shift>, ProvisionError>;

    /// All users ordered by id.
    async fn list_users(&self) -> Result<Vec<User>, ProvisionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(password: &str, role: &str) -> NewUser {
        NewUser {
            username: "john.doe".to_string(),
            password: password.to_string(),
            full_name: None,
            role: role.to_string(),
            shift_id: Some(1),
        }
    }

    #[test]
    fn test_validate_fills_full_name() {
        let user = request("secret123", "operador").validate(6).unwrap();
        assert_eq!(user.full_name, "John Doe");
        assert_eq!(user.role, Role::Operador);
        assert_eq!(user.shift_id, Some(1));
    }

    #[test]
    fn test_validate_keeps_explicit_full_name() {
        let mut req = request("secret123", "admin");
        req.full_name = Some("  Juan García ".to_string());
        let user = req.validate(6).unwrap();
        assert_eq!(user.full_name, "Juan García");

        let mut req = request("secret123", "admin");
        req.full_name = Some("   ".to_string());
        assert_eq!(req.validate(6).unwrap().full_name, "John Doe");
    }

    #[test]
    fn test_validate_rejects_bad_role() {
        let err = request("secret123", "root").validate(6).unwrap_err();
        assert!(matches!(err, ProvisionError::Validation(ref msg) if msg.contains("Invalid role 'root'")));
    }

    #[test]
    fn test_validate_password_length_counts_characters() {
        assert!(matches!(
            request("12345", "operador").validate(6),
            Err(ProvisionError::Validation(_))
        ));
        assert!(request("123456", "operador").validate(6).is_ok());
        // six characters, more than six bytes
        assert!(request("ñññññ1", "operador").validate(6).is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_username() {
        let mut req = request("secret123", "operador");
        req.username = "   ".to_string();
        assert!(matches!(req.validate(6), Err(ProvisionError::Validation(_))));
    }

    #[test]
    fn test_validate_keeps_username_as_typed() {
        let mut req = request("secret123", "operador");
        req.username = " bob ".to_string();
        let user = req.validate(6).unwrap();
        assert_eq!(user.username, " bob ");
        assert_eq!(user.full_name, "Bob");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ProvisionError::Conflict("admin".to_string()).to_string(),
            "User 'admin' already exists"
        );
        assert_eq!(
            ProvisionError::NotFound(9).to_string(),
            "Shift ID 9 does not exist"
        );
    }

    #[test]
    fn test_from_insert_without_sql_error_is_persistence() {
        let err = anyhow::anyhow!("connection reset");
        assert!(matches!(
            ProvisionError::from_insert(&err, "admin", None),
            ProvisionError::Persistence(_)
        ));
    }
}
