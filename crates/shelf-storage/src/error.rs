//! Storage and upload errors

use thiserror::Error;

/// Object store errors
///
/// Write and presign failures stay distinct: a presign failure after a
/// successful write means a stored object exists with no reference to it.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The write to the object store failed
    #[error("storage write failed: {0}")]
    Write(String),

    /// Minting a presigned retrieval URL failed
    #[error("presign failed: {0}")]
    Presign(String),
}

/// Upload pipeline errors
#[derive(Error, Debug)]
pub enum UploadError {
    /// Declared size exceeds the fixed ceiling
    #[error("file size {size} exceeds maximum allowed {limit}")]
    PayloadTooLarge { size: u64, limit: u64 },

    /// Sniffed content type is outside the whitelist
    #[error("file type not allowed: {0}")]
    UnsupportedMediaType(String),

    /// Object store fault (server-side)
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
