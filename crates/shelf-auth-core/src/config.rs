//! Configuration types for the auth core

use std::time::Duration;

/// Auth core configuration
///
/// The signing secret and TTL are read once at startup and immutable
/// afterwards; there are no process-wide globals.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret for HS256 token signing
    pub token_secret: String,
    /// Session token lifetime
    pub token_ttl: Duration,
}

impl AuthConfig {
    /// Create a new auth config
    pub fn new(token_secret: impl Into<String>, token_ttl: Duration) -> Self {
        Self {
            token_secret: token_secret.into(),
            token_ttl,
        }
    }
}
