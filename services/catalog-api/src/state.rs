//! Application state

use std::ops::Deref;
use std::sync::Arc;

use shelf_auth_core::{AccountService, TokenManager};
use shelf_db::{DbPool, ProductRepository, UserRepository};
use shelf_storage::{ObjectStore, UploadPipeline};

use crate::config::Config;

/// Account service over a dynamically dispatched repository
pub type DynAccountService = AccountService<dyn UserRepository>;

/// Shared database pool wrapper for health checks
#[derive(Clone)]
pub struct SharedPool(Arc<DbPool>);

impl Deref for SharedPool {
    type Target = DbPool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Application state shared across handlers
///
/// Repositories and the object store sit behind trait objects; the binary
/// wires the Postgres and S3 implementations, integration tests wire
/// in-memory ones.
#[derive(Clone)]
pub struct AppState {
    /// Account service for registration, login, and user management
    pub accounts: Arc<DynAccountService>,
    /// Product repository
    pub products: Arc<dyn ProductRepository>,
    /// Upload pipeline for product images
    pub uploads: Arc<UploadPipeline<dyn ObjectStore>>,
    /// Token manager (shared with the auth extractor)
    pub tokens: Arc<TokenManager>,
    /// Database connection pool (shared reference for health checks)
    pub pool: SharedPool,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        accounts: Arc<DynAccountService>,
        products: Arc<dyn ProductRepository>,
        uploads: Arc<UploadPipeline<dyn ObjectStore>>,
        tokens: Arc<TokenManager>,
        pool: DbPool,
        config: Config,
    ) -> Self {
        Self {
            accounts,
            products,
            uploads,
            tokens,
            pool: SharedPool(Arc::new(pool)),
            config: Arc::new(config),
        }
    }
}
