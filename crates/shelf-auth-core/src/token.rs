//! Session token issuance and verification
//!
//! Tokens are stateless HS256 JWTs: no server-side record is created and
//! nothing can invalidate an issued token before its expiry instant. Logout
//! is not an operation of this system; revocation, if ever needed, must be
//! added as a visible extension rather than a hidden behavior change.

use chrono::Utc;
use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use shelf_types::Role;

use crate::{AuthConfig, AuthError};

/// Claims carried inside a session token
///
/// `role` deserializes through the closed `Role` enum, so a token carrying
/// an unrecognized role fails verification instead of defaulting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub role: Role,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds), always `iat + TTL`
    pub exp: i64,
}

/// Issues and verifies signed session tokens
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenManager {
    /// Create a new token manager from the shared signing secret
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            ttl: config.token_ttl,
        }
    }

    /// Issue a token for the given identity
    pub fn issue(&self, user_id: i64, role: Role) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id,
            role,
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            AuthError::Signing(e.to_string())
        })
    }

    /// Verify a token and return its claims
    ///
    /// The header is decoded first and the declared algorithm checked
    /// against HS256 before any secret-keyed work happens; a token declaring
    /// any other algorithm is rejected outright.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|e| {
            tracing::debug!("Failed to decode token header: {}", e);
            AuthError::TokenMalformed
        })?;

        if header.alg != Algorithm::HS256 {
            tracing::debug!(alg = ?header.alg, "Token declares unexpected signing algorithm");
            return Err(AuthError::TokenMalformed);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Token validation failed: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::SignatureMismatch,
                _ => AuthError::TokenMalformed,
            }
        })?;

        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
