//! Role and identity types

use serde::{Deserialize, Serialize};

/// User role - a closed set
///
/// Role values arriving from storage or from a token must parse into this
/// enum; anything else is rejected rather than defaulted to `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator - full access to all user records
    Admin,
    /// Regular user - access limited to their own record
    User,
}

impl Role {
    /// Check if this role carries admin rights
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

/// Error parsing a role string
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

/// Authenticated identity attached to a request
///
/// Produced by the authentication gate after token verification. Lives for
/// a single request; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }
}
