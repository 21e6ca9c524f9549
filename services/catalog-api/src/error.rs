//! Error types for the Catalog API service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use shelf_auth_core::AuthError;
use shelf_db::DbError;
use shelf_storage::UploadError;

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// API error type
///
/// The external surface is deliberately coarser than the internal error
/// taxonomy: every token failure class collapses to one 401 body, and
/// internal faults return a generic message with the detail kept in logs.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid or missing credentials")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Resource not found")]
    NotFound,

    #[error("Resource already exists")]
    Conflict,

    #[error("Bad request: {0}")]
    Validation(String),

    #[error("File exceeds maximum allowed size")]
    PayloadTooLarge,

    #[error("File type not allowed")]
    UnsupportedMediaType,

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Validation(_) => "BAD_REQUEST",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        // The internal detail is logged here and never serialized
        if let Self::Internal(detail) = &self {
            tracing::error!(detail, "Internal API error");
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenMalformed
            | AuthError::SignatureMismatch
            | AuthError::TokenExpired
            | AuthError::InvalidCredentials => {
                tracing::debug!(error = ?err, "Authentication rejected");
                Self::Unauthorized
            }
            AuthError::Forbidden => Self::Forbidden,
            AuthError::Conflict => Self::Conflict,
            AuthError::UserNotFound => Self::NotFound,
            AuthError::UnknownRole(_)
            | AuthError::Hashing(_)
            | AuthError::Signing(_)
            | AuthError::Database(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => Self::NotFound,
            DbError::Duplicate => Self::Conflict,
            DbError::Sqlx(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::PayloadTooLarge { .. } => Self::PayloadTooLarge,
            UploadError::UnsupportedMediaType(kind) => {
                tracing::debug!(kind, "Upload rejected by content sniffing");
                Self::UnsupportedMediaType
            }
            UploadError::Storage(e) => Self::Internal(e.to_string()),
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
