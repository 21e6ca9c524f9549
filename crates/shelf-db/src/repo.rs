//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;

use crate::error::DbResult;
use crate::models::{ProductRow, UserRow};

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: i64) -> DbResult<Option<UserRow>>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;

    /// List all users
    async fn list(&self) -> DbResult<Vec<UserRow>>;

    /// Check whether a user exists with the given email or username
    async fn exists_by_email_or_username(&self, email: &str, username: &str) -> DbResult<bool>;

    /// Create a new user
    async fn create(&self, user: CreateUser) -> DbResult<UserRow>;

    /// Replace the mutable fields of a user record
    async fn update(&self, id: i64, update: UpdateUser) -> DbResult<()>;

    /// Delete a user
    async fn delete(&self, id: i64) -> DbResult<()>;
}

/// Create user input
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// Fully-merged update for a user row
///
/// Partial-update merging happens in the service layer; by the time a write
/// reaches the repository every field carries its final value.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// Product repository trait
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product, returning its ID
    async fn create(&self, product: CreateProduct) -> DbResult<i64>;

    /// Find a product by ID
    async fn find_by_id(&self, id: i64) -> DbResult<Option<ProductRow>>;

    /// List all products
    async fn list(&self) -> DbResult<Vec<ProductRow>>;

    /// Replace the mutable fields of a product record
    async fn update(&self, id: i64, update: UpdateProduct) -> DbResult<()>;

    /// Delete a product
    async fn delete(&self, id: i64) -> DbResult<()>;
}

/// Create product input
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub title: String,
    pub price: i64,
    pub description: String,
    pub available: bool,
    pub image_url: String,
}

/// Fully-merged update for a product row
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub title: String,
    pub price: i64,
    pub description: String,
    pub available: bool,
    pub image_url: String,
}
