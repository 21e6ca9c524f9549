//! Account service - ties together hashing, tokens, policy, and the user
//! repository

use std::sync::Arc;

use shelf_db::{CreateUser, UpdateUser, UserRepository, UserRow};
use shelf_types::{CreateUserInput, Identity, Role, UpdateUserInput, User};

use crate::{hash_password, policy, token::TokenManager, verify_password, AuthError};

/// Account service
///
/// Generic over the user repository so tests can run against an in-memory
/// implementation. Every call recomputes hashing, verification, and policy
/// from scratch; there is no per-identity caching.
pub struct AccountService<R: UserRepository + ?Sized> {
    repo: Arc<R>,
    tokens: Arc<TokenManager>,
}

impl<R: UserRepository + ?Sized> AccountService<R> {
    /// Create a new account service
    pub fn new(repo: Arc<R>, tokens: Arc<TokenManager>) -> Self {
        Self { repo, tokens }
    }

    /// Register a new account
    ///
    /// New accounts always get `Role::User`; there is no way to register as
    /// an admin. Duplicate email or username is a `Conflict`.
    pub async fn register(&self, input: CreateUserInput) -> Result<User, AuthError> {
        let exists = self
            .repo
            .exists_by_email_or_username(&input.email, &input.username)
            .await?;
        if exists {
            return Err(AuthError::Conflict);
        }

        let password_hash = hash_password(&input.password)?;

        let row = self
            .repo
            .create(CreateUser {
                username: input.username,
                email: input.email,
                password_hash,
                role: Role::User.to_string(),
            })
            .await?;

        to_user(row)
    }

    /// Authenticate and issue a session token
    ///
    /// Unknown email and wrong password both collapse to
    /// `InvalidCredentials` so login cannot be used to enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let row = match self.repo.find_by_email(email).await? {
            Some(row) => row,
            None => {
                tracing::debug!("Login attempt for unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        verify_password(&row.password_hash, password)?;

        let role = parse_role(&row.role)?;
        self.tokens.issue(row.id, role)
    }

    /// Fetch a single user record, policy permitting
    pub async fn get_user(&self, requester: Identity, target_id: i64) -> Result<User, AuthError> {
        policy::can_view_user(requester, target_id)?;

        let row = self
            .repo
            .find_by_id(target_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        to_user(row)
    }

    /// List every user record - admin only
    pub async fn list_users(&self, requester: Identity) -> Result<Vec<User>, AuthError> {
        policy::can_list_users(requester)?;

        let rows = self.repo.list().await?;
        rows.into_iter().map(to_user).collect()
    }

    /// Apply a partial update to a user record, policy permitting
    ///
    /// Unset fields leave the stored value unchanged. A role change from a
    /// non-admin is silently dropped rather than rejected.
    pub async fn update_user(
        &self,
        requester: Identity,
        target_id: i64,
        mut input: UpdateUserInput,
    ) -> Result<(), AuthError> {
        policy::can_modify_user(requester, target_id)?;
        policy::scrub_role_change(requester, &mut input);

        let current = self
            .repo
            .find_by_id(target_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let password_hash = match input.password {
            Some(password) => hash_password(&password)?,
            None => current.password_hash,
        };

        let update = UpdateUser {
            username: input.username.unwrap_or(current.username),
            email: input.email.unwrap_or(current.email),
            password_hash,
            role: input
                .role
                .map(|r| r.to_string())
                .unwrap_or(current.role),
        };

        self.repo.update(target_id, update).await?;
        Ok(())
    }

    /// Delete a user record, policy permitting
    pub async fn delete_user(
        &self,
        requester: Identity,
        target_id: i64,
    ) -> Result<(), AuthError> {
        policy::can_modify_user(requester, target_id)?;
        self.repo.delete(target_id).await?;
        Ok(())
    }
}

impl<R: UserRepository + ?Sized> std::fmt::Debug for AccountService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}

/// Parse a stored role string, failing closed on anything outside the set
fn parse_role(role: &str) -> Result<Role, AuthError> {
    role.parse::<Role>().map_err(|_| {
        tracing::error!(role, "Stored role outside the closed set");
        AuthError::UnknownRole(role.to_string())
    })
}

/// Convert a row into the API-facing user view
fn to_user(row: UserRow) -> Result<User, AuthError> {
    let role = parse_role(&row.role)?;
    Ok(User {
        id: row.id,
        username: row.username,
        email: row.email,
        role,
        created_at: row.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_fails_closed() {
        assert!(parse_role("admin").is_ok());
        assert!(parse_role("user").is_ok());
        assert!(matches!(
            parse_role("owner"),
            Err(AuthError::UnknownRole(_))
        ));
    }
}
