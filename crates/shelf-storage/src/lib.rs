//! Shelf Storage - Secure asset ingestion
//!
//! Validates user-supplied binary assets (size ceiling, magic-byte content
//! sniffing against a whitelist), derives collision-resistant storage keys,
//! hands validated bytes to an S3-compatible object store, and issues
//! time-bounded retrieval URLs.

pub mod config;
pub mod error;
pub mod sniff;
pub mod store;
pub mod upload;

pub use config::StorageConfig;
pub use error::{StoreError, UploadError};
pub use store::{ObjectStore, S3ObjectStore};
pub use upload::{IncomingFile, UploadPipeline, MAX_FILE_SIZE};
