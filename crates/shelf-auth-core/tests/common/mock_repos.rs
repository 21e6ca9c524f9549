//! Mock repositories for testing

use async_trait::async_trait;
use chrono::Utc;
use shelf_db::{CreateUser, DbError, DbResult, UpdateUser, UserRepository, UserRow};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory user repository for testing
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<Mutex<HashMap<i64, UserRow>>>,
    next_id: Arc<AtomicI64>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Insert a user directly, bypassing registration
    pub fn insert_user(&self, username: &str, email: &str, password_hash: &str, role: &str) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = UserRow {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role: role.to_string(),
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().insert(id, row);
        id
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: i64) -> DbResult<Option<UserRow>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self) -> DbResult<Vec<UserRow>> {
        let mut users: Vec<UserRow> = self.users.lock().unwrap().values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn exists_by_email_or_username(&self, email: &str, username: &str) -> DbResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| u.email == email || u.username == username))
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = UserRow {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, update: UpdateUser) -> DbResult<()> {
        let mut users = self.users.lock().unwrap();
        let row = users.get_mut(&id).ok_or(DbError::NotFound)?;
        row.username = update.username;
        row.email = update.email;
        row.password_hash = update.password_hash;
        row.role = update.role;
        Ok(())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        self.users
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(DbError::NotFound)
    }
}
