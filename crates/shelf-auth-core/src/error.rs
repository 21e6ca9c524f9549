//! Auth errors

use thiserror::Error;

/// Authentication and authorization errors
///
/// The three token failure classes (`TokenMalformed`, `SignatureMismatch`,
/// `TokenExpired`) are kept distinct for diagnostics but all map to the same
/// external 401 outcome; callers must not expose the distinction to clients.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Token is structurally invalid or declares an unexpected algorithm
    #[error("malformed token")]
    TokenMalformed,

    /// Token signature does not verify against the shared secret
    #[error("token signature mismatch")]
    SignatureMismatch,

    /// Token is past its expiry instant
    #[error("token expired")]
    TokenExpired,

    /// Wrong password or unknown account
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Authenticated but denied by policy
    #[error("forbidden")]
    Forbidden,

    /// Duplicate identity attributes (email or username already taken)
    #[error("conflict")]
    Conflict,

    /// User not found
    #[error("user not found")]
    UserNotFound,

    /// A stored or transmitted role value outside the closed set
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// Underlying password hashing failure
    #[error("hashing error: {0}")]
    Hashing(String),

    /// Token signing failure (server fault, never the caller's)
    #[error("signing error: {0}")]
    Signing(String),

    /// Database error
    #[error("database error: {0}")]
    Database(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::TokenMalformed
            | Self::SignatureMismatch
            | Self::TokenExpired
            | Self::InvalidCredentials => 401,
            Self::Forbidden => 403,
            Self::UserNotFound => 404,
            Self::Conflict => 409,
            Self::UnknownRole(_) | Self::Hashing(_) | Self::Signing(_) | Self::Database(_) => 500,
        }
    }
}

impl From<shelf_db::DbError> for AuthError {
    fn from(err: shelf_db::DbError) -> Self {
        match err {
            shelf_db::DbError::NotFound => Self::UserNotFound,
            // A constraint-rejected write is a duplicate that slipped past
            // the existence check, not a server fault
            shelf_db::DbError::Duplicate => Self::Conflict,
            other => {
                tracing::error!("Database error: {}", other);
                Self::Database(other.to_string())
            }
        }
    }
}
