//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.
//! The `role` column is stored as text; callers parse it into the closed
//! `Role` enum and must reject values outside the set.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Product row from the database
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub title: String,
    pub price: i64,
    pub description: String,
    pub available: bool,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}
