use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::entities::users;

/// Authorization tier stored in `users.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    Admin,
    #[default]
    Operador,
    Supervisor,
    Storekeeper,
}

impl Role {
    pub const ALL: [Self; 4] = [
        Self::Admin,
        Self::Operador,
        Self::Supervisor,
        Self::Storekeeper,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Operador => "operador",
            Self::Supervisor => "supervisor",
            Self::Storekeeper => "storekeeper",
        }
    }

    #[must_use]
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid role '{0}'. Valid roles: {roles}", roles = Role::valid_names())]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// User data returned to callers (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub role: String,
    pub shift_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            full_name: model.full_name,
            role: model.role,
            shift_id: model.shift_id,
            created_at: model.created_at,
        }
    }
}

const NAME_SEPARATORS: [char; 3] = ['.', '_', '-'];

/// Builds a display name from a login name: `john.doe` becomes `John Doe`.
///
/// Separators turn into spaces, then every run of letters is capitalised
/// with the remainder lowercased. Any non-letter starts a new word, so
/// `ana2smith` becomes `Ana2Smith`.
#[must_use]
pub fn derive_full_name(username: &str) -> String {
    let mut out = String::with_capacity(username.len());
    let mut in_word = false;

    for c in username.chars() {
        let c = if NAME_SEPARATORS.contains(&c) { ' ' } else { c };

        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}
