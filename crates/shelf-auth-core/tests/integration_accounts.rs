//! End-to-end account flows against an in-memory repository

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::mock_repos::MockUserRepository;
use shelf_auth_core::{
    hash_password, AccountService, AuthConfig, AuthError, TokenManager,
};
use shelf_types::{CreateUserInput, Identity, Role, UpdateUserInput};

fn setup() -> (AccountService<MockUserRepository>, MockUserRepository, Arc<TokenManager>) {
    let repo = MockUserRepository::new();
    let tokens = Arc::new(TokenManager::new(&AuthConfig::new(
        "integration-test-signing-secret",
        Duration::from_secs(3600),
    )));
    let service = AccountService::new(Arc::new(repo.clone()), Arc::clone(&tokens));
    (service, repo, tokens)
}

fn alice_input() -> CreateUserInput {
    CreateUserInput {
        username: "alice".to_string(),
        email: "a@x.com".to_string(),
        password: "secret1".to_string(),
    }
}

#[tokio::test]
async fn test_register_then_login_returns_verifiable_token() {
    let (service, _repo, tokens) = setup();

    let user = service.register(alice_input()).await.unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.role, Role::User);

    let token = service.login("a@x.com", "secret1").await.unwrap();
    let claims = tokens.verify(&token).unwrap();
    assert_eq!(claims.user_id, user.id);
    assert_eq!(claims.role, Role::User);
    assert!(claims.iat < claims.exp);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let (service, _repo, _tokens) = setup();

    service.register(alice_input()).await.unwrap();

    // Same email, different username
    let result = service
        .register(CreateUserInput {
            username: "alice2".to_string(),
            email: "a@x.com".to_string(),
            password: "secret2".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AuthError::Conflict)));

    // Same username, different email
    let result = service
        .register(CreateUserInput {
            username: "alice".to_string(),
            email: "b@x.com".to_string(),
            password: "secret2".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AuthError::Conflict)));
}

#[tokio::test]
async fn test_login_failures_collapse_to_invalid_credentials() {
    let (service, _repo, _tokens) = setup();
    service.register(alice_input()).await.unwrap();

    // Unknown email and wrong password are indistinguishable
    let unknown = service.login("nobody@x.com", "secret1").await;
    assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));

    let wrong = service.login("a@x.com", "wrong").await;
    assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_list_users_requires_admin() {
    let (service, repo, _tokens) = setup();

    let user = service.register(alice_input()).await.unwrap();
    let admin_hash = hash_password("admin-pw").unwrap();
    let admin_id = repo.insert_user("root", "root@x.com", &admin_hash, "admin");

    let as_user = service.list_users(Identity::new(user.id, Role::User)).await;
    assert!(matches!(as_user, Err(AuthError::Forbidden)));

    let as_admin = service
        .list_users(Identity::new(admin_id, Role::Admin))
        .await
        .unwrap();
    assert_eq!(as_admin.len(), 2);
}

#[tokio::test]
async fn test_non_admin_cannot_touch_other_records() {
    let (service, repo, _tokens) = setup();

    let user = service.register(alice_input()).await.unwrap();
    let other_id = repo.insert_user("bob", "b@x.com", "hash", "user");

    let me = Identity::new(user.id, Role::User);

    let update = service
        .update_user(me, other_id, UpdateUserInput::default())
        .await;
    assert!(matches!(update, Err(AuthError::Forbidden)));

    let delete = service.delete_user(me, other_id).await;
    assert!(matches!(delete, Err(AuthError::Forbidden)));

    let get = service.get_user(me, other_id).await;
    assert!(matches!(get, Err(AuthError::Forbidden)));
}

#[tokio::test]
async fn test_self_update_drops_role_field() {
    let (service, _repo, _tokens) = setup();

    let user = service.register(alice_input()).await.unwrap();
    let me = Identity::new(user.id, Role::User);

    // Attempted privilege escalation rides along a legitimate rename
    service
        .update_user(
            me,
            user.id,
            UpdateUserInput {
                username: Some("alice-renamed".to_string()),
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let updated = service.get_user(me, user.id).await.unwrap();
    assert_eq!(updated.username, "alice-renamed");
    assert_eq!(updated.role, Role::User);
}

#[tokio::test]
async fn test_admin_role_change_is_honored() {
    let (service, repo, _tokens) = setup();

    let user = service.register(alice_input()).await.unwrap();
    let admin_id = repo.insert_user("root", "root@x.com", "hash", "admin");
    let admin = Identity::new(admin_id, Role::Admin);

    service
        .update_user(
            admin,
            user.id,
            UpdateUserInput {
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let updated = service.get_user(admin, user.id).await.unwrap();
    assert_eq!(updated.role, Role::Admin);
}

#[tokio::test]
async fn test_password_change_rehashes() {
    let (service, _repo, _tokens) = setup();

    let user = service.register(alice_input()).await.unwrap();
    let me = Identity::new(user.id, Role::User);

    service
        .update_user(
            me,
            user.id,
            UpdateUserInput {
                password: Some("new-secret".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(service.login("a@x.com", "secret1").await.is_err());
    assert!(service.login("a@x.com", "new-secret").await.is_ok());
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let (service, repo, _tokens) = setup();
    let admin_id = repo.insert_user("root", "root@x.com", "hash", "admin");
    let admin = Identity::new(admin_id, Role::Admin);

    let result = service
        .update_user(admin, 9999, UpdateUserInput::default())
        .await;
    assert!(matches!(result, Err(AuthError::UserNotFound)));
}

#[tokio::test]
async fn test_stored_unknown_role_fails_closed_on_login() {
    let (service, repo, _tokens) = setup();
    let hash = hash_password("secret1").unwrap();
    repo.insert_user("mallory", "m@x.com", &hash, "owner");

    let result = service.login("m@x.com", "secret1").await;
    assert!(matches!(result, Err(AuthError::UnknownRole(_))));
}

#[tokio::test]
async fn test_register_race_lost_to_constraint_is_conflict() {
    use async_trait::async_trait;
    use shelf_db::{CreateUser, DbError, DbResult, UpdateUser, UserRepository, UserRow};

    /// Repository where the existence check never sees the concurrent
    /// writer, so the unique constraint is what rejects the insert
    struct RaceyRepository {
        inner: MockUserRepository,
    }

    #[async_trait]
    impl UserRepository for RaceyRepository {
        async fn find_by_id(&self, id: i64) -> DbResult<Option<UserRow>> {
            self.inner.find_by_id(id).await
        }

        async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
            self.inner.find_by_email(email).await
        }

        async fn list(&self) -> DbResult<Vec<UserRow>> {
            self.inner.list().await
        }

        async fn exists_by_email_or_username(&self, _email: &str, _username: &str) -> DbResult<bool> {
            Ok(false)
        }

        async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
            let taken = self
                .inner
                .exists_by_email_or_username(&user.email, &user.username)
                .await?;
            if taken {
                return Err(DbError::Duplicate);
            }
            self.inner.create(user).await
        }

        async fn update(&self, id: i64, update: UpdateUser) -> DbResult<()> {
            self.inner.update(id, update).await
        }

        async fn delete(&self, id: i64) -> DbResult<()> {
            self.inner.delete(id).await
        }
    }

    let inner = MockUserRepository::new();
    inner.insert_user("alice", "a@x.com", "hash", "user");

    let tokens = Arc::new(TokenManager::new(&AuthConfig::new(
        "integration-test-signing-secret",
        Duration::from_secs(3600),
    )));
    let service = AccountService::new(
        Arc::new(RaceyRepository { inner }),
        tokens,
    );

    let result = service.register(alice_input()).await;
    assert!(matches!(result, Err(AuthError::Conflict)));
}

#[tokio::test]
async fn test_self_delete_allowed() {
    let (service, _repo, _tokens) = setup();
    let user = service.register(alice_input()).await.unwrap();
    let me = Identity::new(user.id, Role::User);

    service.delete_user(me, user.id).await.unwrap();
    let result = service.login("a@x.com", "secret1").await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}
