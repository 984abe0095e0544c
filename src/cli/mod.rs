//! CLI module - Command-line interface for creating inventario users
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use std::path::PathBuf;

use clap::Parser;

use crate::services::{NewUser, ProvisionError};

/// Create a new user in the inventario system
#[derive(Parser, Debug)]
#[command(name = "create-user")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:
  create-user admin secret123 --full-name \"Admin User\" --role admin
  create-user john.doe password --full-name \"John Doe\" --role operador --shift 1
  create-user supervisor pass456 --role supervisor
  create-user --list-shifts")]
pub struct Cli {
    /// Username for the new user
    pub username: Option<String>,

    /// Password for the new user
    pub password: Option<String>,

    /// Full name of the user (derived from the username when omitted)
    #[arg(short = 'n', long)]
    pub full_name: Option<String>,

    /// User role: admin, operador, supervisor, storekeeper
    #[arg(short, long, default_value = "operador")]
    pub role: String,

    /// Shift ID (optional)
    #[arg(short, long)]
    pub shift: Option<i32>,

    /// List available shifts and exit
    #[arg(long, conflicts_with_all = ["username", "password", "list_users"])]
    pub list_shifts: bool,

    /// List existing users and exit
    #[arg(long, conflicts_with_all = ["username", "password"])]
    pub list_users: bool,

    /// Path to a config.toml (default: ./config.toml, then the user config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// What a parsed command line asks for.
#[derive(Debug)]
pub enum Action {
    ListShifts,
    ListUsers,
    Create(NewUser),
}

impl Cli {
    pub fn action(self) -> Result<Action, ProvisionError> {
        if self.list_shifts {
            return Ok(Action::ListShifts);
        }
        if self.list_users {
            return Ok(Action::ListUsers);
        }

        match (self.username, self.password) {
            (Some(username), Some(password)) => Ok(Action::Create(NewUser {
                username,
                password,
                full_name: self.full_name,
                role: self.role,
                shift_id: self.shift,
            })),
            _ => Err(ProvisionError::Validation(
                "Username and password are required unless using --list-shifts or --list-users"
                    .to_string(),
            )),
        }
    }
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("create-user").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_full_create() {
        let cli = parse(&[
            "john.doe", "password", "-n", "John Doe", "-r", "admin", "-s", "2",
        ])
        .unwrap();

        let Action::Create(user) = cli.action().unwrap() else {
            panic!("expected create action");
        };
        assert_eq!(user.username, "john.doe");
        assert_eq!(user.password, "password");
        assert_eq!(user.full_name.as_deref(), Some("John Doe"));
        assert_eq!(user.role, "admin");
        assert_eq!(user.shift_id, Some(2));
    }

    #[test]
    fn test_role_defaults_to_operador() {
        let cli = parse(&["maria", "secret123"]).unwrap();
        let Action::Create(user) = cli.action().unwrap() else {
            panic!("expected create action");
        };
        assert_eq!(user.role, "operador");
        assert_eq!(user.shift_id, None);
        assert_eq!(user.full_name, None);
    }

    #[test]
    fn test_unknown_role_is_left_to_the_provisioner() {
        let cli = parse(&["maria", "secret123", "--role", "root"]).unwrap();
        assert!(matches!(cli.action(), Ok(Action::Create(_))));
    }

    #[test]
    fn test_list_shifts() {
        let cli = parse(&["--list-shifts"]).unwrap();
        assert!(matches!(cli.action(), Ok(Action::ListShifts)));
    }

    #[test]
    fn test_list_users() {
        let cli = parse(&["--list-users"]).unwrap();
        assert!(matches!(cli.action(), Ok(Action::ListUsers)));
    }

    #[test]
    fn test_list_shifts_conflicts_with_positionals() {
        assert!(parse(&["john", "secret123", "--list-shifts"]).is_err());
        assert!(parse(&["--list-shifts", "--list-users"]).is_err());
    }

    #[test]
    fn test_missing_password_is_a_validation_error() {
        let cli = parse(&["john"]).unwrap();
        assert!(matches!(cli.action(), Err(ProvisionError::Validation(_))));

        let cli = parse(&[]).unwrap();
        assert!(matches!(cli.action(), Err(ProvisionError::Validation(_))));
    }

    #[test]
    fn test_shift_must_be_integer() {
        assert!(parse(&["john", "secret123", "--shift", "morning"]).is_err());
    }
}
