//! User types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Role;

/// User entity as exposed to API consumers
///
/// The password hash never leaves the persistence layer; this is the view
/// handlers serialize.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Registration input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login input
#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Partial update for a user record
///
/// `None` means leave the field unchanged; this is distinct from an explicit
/// empty value. The `role` field is only honored for admin requesters - the
/// policy layer scrubs it for everyone else.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}
