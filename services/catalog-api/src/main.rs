//! Catalog API
//!
//! Multi-tenant catalog service: account registration and login, token
//! authenticated user management, and a product catalog with validated
//! image uploads to S3-compatible object storage.
//!
//! ## REST Endpoints
//!
//! - `POST /api/v1/users/register` - Create an account
//! - `POST /api/v1/users/login` - Exchange credentials for a token
//! - `GET /api/v1/users` - List users (admin)
//! - `GET /api/v1/users/:id` - Get a user (self or admin)
//! - `PUT /api/v1/users/:id` - Update a user (self or admin)
//! - `DELETE /api/v1/users/:id` - Delete a user (self or admin)
//! - `GET /api/v1/products` - List products (public)
//! - `GET /api/v1/products/:id` - Get a product (public)
//! - `POST /api/v1/products` - Create a product (multipart, authenticated)
//! - `PUT /api/v1/products/:id` - Update a product (multipart, authenticated)
//! - `DELETE /api/v1/products/:id` - Delete a product (authenticated)
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe

use std::net::SocketAddr;
use std::sync::Arc;

use shelf_auth_core::{AccountService, TokenManager};
use shelf_db::pg::Repositories;
use shelf_db::{ProductRepository, UserRepository};
use shelf_storage::{ObjectStore, S3ObjectStore, UploadPipeline};
use tokio::signal;
use tracing_subscriber::EnvFilter;

use catalog_api::config::Config;
use catalog_api::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Catalog API");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Configuration loaded");

    // Create database pool and apply migrations
    let pool = shelf_db::create_pool(&config.database_url).await?;
    shelf_db::run_migrations(&pool).await?;
    tracing::info!("Database pool created");

    // Create repositories and services
    let repos = Repositories::new(pool.clone());
    let users: Arc<dyn UserRepository> = Arc::new(repos.users.clone());
    let products: Arc<dyn ProductRepository> = Arc::new(repos.products);
    let tokens = Arc::new(TokenManager::new(&config.auth));
    let accounts = Arc::new(AccountService::new(users, Arc::clone(&tokens)));
    let store: Arc<dyn ObjectStore> = Arc::new(S3ObjectStore::new(&config.storage));
    let uploads = Arc::new(UploadPipeline::new(store));

    // Create application state
    let state = AppState::new(accounts, products, uploads, tokens, pool, config.clone());

    // Build router and serve
    let app = build_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = ?e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => tracing::error!(error = ?e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
