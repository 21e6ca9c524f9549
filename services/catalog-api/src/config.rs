//! Configuration for the Catalog API service.

use std::time::Duration;

use shelf_auth_core::AuthConfig;
use shelf_storage::StorageConfig;

/// Catalog API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub port: u16,

    /// Database URL
    pub database_url: String,

    /// Auth core configuration
    pub auth: AuthConfig,

    /// Object storage configuration
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Database
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        // Server port
        let port = std::env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("SERVER_PORT"))?;

        // Token signing secret (minimum 32 bytes)
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        if jwt_secret.len() < 32 {
            return Err(ConfigError::Invalid(
                "JWT_SECRET must be at least 32 characters",
            ));
        }

        // Token lifetime (default 1 hour)
        let token_ttl_secs: u64 = std::env::var("TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("TOKEN_TTL_SECS"))?;

        // Object storage
        let s3_endpoint =
            std::env::var("S3_ENDPOINT").map_err(|_| ConfigError::Missing("S3_ENDPOINT"))?;

        // Presigned URLs must resolve from outside the deployment network;
        // when unset, the internal endpoint is assumed reachable
        let s3_public_endpoint = std::env::var("S3_PUBLIC_ENDPOINT").ok();

        let s3_access_key =
            std::env::var("S3_ACCESS_KEY").map_err(|_| ConfigError::Missing("S3_ACCESS_KEY"))?;

        let s3_secret_key =
            std::env::var("S3_SECRET_KEY").map_err(|_| ConfigError::Missing("S3_SECRET_KEY"))?;

        let s3_bucket =
            std::env::var("S3_BUCKET").map_err(|_| ConfigError::Missing("S3_BUCKET"))?;

        let s3_region = std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        Ok(Self {
            port,
            database_url,
            auth: AuthConfig::new(jwt_secret, Duration::from_secs(token_ttl_secs)),
            storage: StorageConfig {
                endpoint: s3_endpoint,
                public_endpoint: s3_public_endpoint,
                access_key: s3_access_key,
                secret_key: s3_secret_key,
                bucket: s3_bucket,
                region: s3_region,
            },
        })
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
