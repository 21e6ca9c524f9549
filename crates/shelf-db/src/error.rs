//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    /// Record not found
    #[error("record not found")]
    NotFound,

    /// A unique constraint rejected the write
    ///
    /// Existence checks race with concurrent inserts; the constraint is the
    /// arbiter, and callers treat this the same as a pre-checked duplicate.
    #[error("duplicate record")]
    Duplicate,
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return Self::Duplicate;
            }
        }
        Self::Sqlx(err)
    }
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;
