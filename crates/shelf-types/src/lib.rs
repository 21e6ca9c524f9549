//! Shelf Types - Shared domain types
//!
//! This crate contains domain types used across the catalog service:
//! - Roles and the authenticated identity
//! - User and product entities
//! - Partial-update inputs

pub mod product;
pub mod role;
pub mod user;

pub use product::*;
pub use role::*;
pub use user::*;
