//! Axum extractors for authentication

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use shelf_types::Identity;

use crate::state::AppState;

/// Authenticated caller extracted from the request
///
/// Verification is purely computational: signature and expiry against the
/// shared secret, no lookups, no per-request state carried anywhere else.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub identity: Identity,
}

/// Error response for auth failures
#[derive(Debug, Serialize)]
struct AuthErrorResponse {
    error: AuthErrorDetail,
}

#[derive(Debug, Serialize)]
struct AuthErrorDetail {
    code: &'static str,
    message: &'static str,
}

/// Auth rejection type
pub struct AuthRejection {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = AuthErrorResponse {
            error: AuthErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let app_state = AppState::from_ref(state);

            let token = extract_token(parts)?;

            // Malformed, tampered, and expired tokens are distinguishable
            // in logs but share one external outcome
            let claims = app_state.tokens.verify(&token).map_err(|e| {
                tracing::debug!(error = ?e, "Token verification failed");
                AuthRejection {
                    status: StatusCode::UNAUTHORIZED,
                    code: "INVALID_TOKEN",
                    message: "Invalid or expired token",
                }
            })?;

            Ok(AuthUser {
                identity: Identity::new(claims.user_id, claims.role),
            })
        })
    }
}

/// Extract a Bearer token from the Authorization header
///
/// Missing and malformed credentials share the 401 outcome; a header the
/// gate cannot read is no more authenticated than no header at all.
fn extract_token(parts: &Parts) -> Result<String, AuthRejection> {
    if let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header.to_str().map_err(|_| AuthRejection {
            status: StatusCode::UNAUTHORIZED,
            code: "INVALID_TOKEN",
            message: "Invalid authentication credentials",
        })?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.to_string());
        }
    }

    Err(AuthRejection {
        status: StatusCode::UNAUTHORIZED,
        code: "MISSING_TOKEN",
        message: "No authentication token provided",
    })
}
