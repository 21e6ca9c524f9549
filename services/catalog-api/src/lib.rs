//! Catalog API library
//!
//! The service's router, state, extractors, and handlers live here so the
//! HTTP surface can be driven in integration tests without a listening
//! socket; the binary in `main.rs` only wires configuration and serves.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
