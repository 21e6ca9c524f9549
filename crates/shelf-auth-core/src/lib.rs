//! Shelf Auth Core - Identity and access control
//!
//! Core security functionality for the catalog service: credential hashing,
//! signed session tokens, the authorization policy, and the account service
//! that composes them over a user repository.

pub mod config;
pub mod error;
pub mod password;
pub mod policy;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use service::AccountService;
pub use token::{Claims, TokenManager};
