//! In-memory repositories and object store for router tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use shelf_db::{
    CreateProduct, CreateUser, DbError, DbResult, ProductRepository, ProductRow, UpdateProduct,
    UpdateUser, UserRepository, UserRow,
};
use shelf_storage::{ObjectStore, StoreError};

/// In-memory user repository
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

/// In-memory product repository
#[derive(Default, Clone)]
pub struct MockProductRepository {
    products: Arc<Mutex<HashMap<i64, ProductRow>>>,
    next_id: Arc<AtomicI64>,
}

impl MockProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

#[async_trait]
impl ProductRepository for MockProductRepository {
    async fn create(&self, product: CreateProduct) -> DbResult<i64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = ProductRow {
            id,
            title: product.title,
            price: product.price,
            description: product.description,
            available: product.available,
            image_url: product.image_url,
            created_at: Utc::now(),
        };
        self.products.lock().unwrap().insert(id, row);
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> DbResult<Option<ProductRow>> {
        Ok(self.products.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> DbResult<Vec<ProductRow>> {
        let mut products: Vec<ProductRow> =
            self.products.lock().unwrap().values().cloned().collect();
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    async fn update(&self, id: i64, update: UpdateProduct) -> DbResult<()> {
        let mut products = self.products.lock().unwrap();
        let row = products.get_mut(&id).ok_or(DbError::NotFound)?;
        row.title = update.title;
        row.price = update.price;
        row.description = update.description;
        row.available = update.available;
        row.image_url = update.image_url;
        Ok(())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        self.products
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(DbError::NotFound)
    }
}

/// In-memory object store that records writes
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<Vec<(String, String)>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored (key, content_type) pairs in write order
    pub fn stored(&self) -> Vec<(String, String)> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        key: &str,
        _data: Bytes,
        _size: u64,
        content_type: &str,
    ) -> Result<(), StoreError> {
        self.objects
            .lock()
            .unwrap()
            .push((key.to_string(), content_type.to_string()));
        Ok(())
    }

    async fn presigned_url(&self, key: &str, _ttl: Duration) -> Result<String, StoreError> {
        Ok(format!("http://store.local/{key}"))
    }
}
