//! Account entity and role enumeration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Roles available in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrator — may list all accounts.
    Admin,
    /// Regular account.
    User,
    /// Developer account used by the frontend team.
    Developer,
}

impl Role {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Developer => "developer",
        }
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "developer" => Ok(Self::Developer),
            _ => Err(AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: admin, user, developer"
            ))),
        }
    }
}

/// A registered account.
///
/// Owned by the credential directory; the auth subsystem only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier.
    pub id: i64,
    /// Unique login email.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Human-readable display name.
    pub name: String,
    /// Assigned role.
    pub role: Role,
    /// Avatar image URL.
    pub avatar: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Password-stripped projection safe to return to clients.
    pub fn to_public(&self) -> PublicAccount {
        PublicAccount {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            avatar: self.avatar.clone(),
            created_at: self.created_at,
        }
    }
}

/// Account projection without the password hash. Serialized camelCase,
/// like the rest of the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAccount {
    /// Unique account identifier.
    pub id: i64,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Assigned role.
    pub role: Role,
    /// Avatar image URL.
    pub avatar: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
