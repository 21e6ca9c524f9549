//! User account handlers (register, login, user management)

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use shelf_types::{CreateUserInput, UpdateUserInput, User};

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/v1/users/register
///
/// Create a new account. The role is always `user`; promotion is an admin
/// update, never part of registration.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    if req.username.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation(
            "username, email, and password are required".to_string(),
        ));
    }

    let user = state
        .accounts
        .register(CreateUserInput {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/v1/users/login
///
/// Exchange credentials for a session token
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let token = state.accounts.login(&req.email, &req.password).await?;
    Ok(Json(LoginResponse { token }))
}

/// GET /api/v1/users - admin only
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<User>>> {
    let users = state.accounts.list_users(auth.identity).await?;
    Ok(Json(users))
}

/// GET /api/v1/users/:id - self or admin
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<User>> {
    let user = state.accounts.get_user(auth.identity, id).await?;
    Ok(Json(user))
}

/// PUT /api/v1/users/:id - self or admin; role changes admin only
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<UpdateUserInput>,
) -> ApiResult<StatusCode> {
    state.accounts.update_user(auth.identity, id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/users/:id - self or admin
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.accounts.delete_user(auth.identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
