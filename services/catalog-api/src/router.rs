//! Router construction

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use shelf_storage::MAX_FILE_SIZE;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::handlers;
use crate::handlers::{health, ready};
use crate::state::AppState;

// Multipart framing adds overhead on top of the file itself
pub const MAX_BODY_BYTES: usize = MAX_FILE_SIZE as usize + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let api_v1 = Router::new()
        // Account routes
        .route("/users/register", post(handlers::register))
        .route("/users/login", post(handlers::login))
        .route("/users", get(handlers::list_users))
        .route(
            "/users/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        // Catalog routes
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/products/:id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        );

    // Health routes stay outside the middleware stack
    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    Router::new()
        .nest("/api/v1", api_v1)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware)
        .merge(health_routes)
        .with_state(state)
}
