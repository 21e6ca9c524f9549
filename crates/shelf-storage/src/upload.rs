//! Upload pipeline: validate, key, store, presign

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::UploadError;
use crate::sniff;
use crate::store::ObjectStore;

/// Hard ceiling on accepted file size (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Lifetime of minted retrieval URLs.
pub const PRESIGN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

const KEY_RANDOM_BYTES: usize = 16;
const MAX_EXT_LEN: usize = 10;

/// A file as received from a client, before any validation.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// Raw bytes of the file body
    pub data: Bytes,
    /// Size the client declared for the body, checked before anything else
    pub declared_size: u64,
    /// Original filename as supplied by the client; only its extension is
    /// ever used, and only after sanitization
    pub filename: String,
}

/// Validates incoming files and moves them into the object store.
pub struct UploadPipeline<S: ObjectStore + ?Sized> {
    store: Arc<S>,
}

impl<S: ObjectStore + ?Sized> UploadPipeline<S> {
    pub fn new(store: Arc<S>) -> Self {
        UploadPipeline { store }
    }

    /// Runs a file through the full pipeline and returns a presigned
    /// retrieval URL for the stored object.
    ///
    /// The declared size is rejected before the body is inspected, the
    /// content type is taken from the bytes themselves (never from what
    /// the client claims), and the stored object carries that sniffed
    /// type end to end.
    pub async fn ingest(&self, file: IncomingFile) -> Result<String, UploadError> {
        if file.declared_size > MAX_FILE_SIZE {
            return Err(UploadError::PayloadTooLarge {
                size: file.declared_size,
                limit: MAX_FILE_SIZE,
            });
        }

        let content_type = match sniff::sniff_content_type(&file.data) {
            Some(kind) if sniff::is_allowed(kind) => kind,
            Some(kind) => return Err(UploadError::UnsupportedMediaType(kind.to_string())),
            None => {
                return Err(UploadError::UnsupportedMediaType(
                    "unrecognized content".to_string(),
                ))
            }
        };

        let key = generate_key(&file.filename);
        self.store
            .upload(&key, file.data, file.declared_size, content_type)
            .await?;

        match self.store.presigned_url(&key, PRESIGN_TTL).await {
            Ok(url) => Ok(url),
            Err(e) => {
                // The object was written but no URL reaches the caller,
                // so nothing will ever reference it. Log the key for
                // manual cleanup.
                tracing::error!(key = %key, error = %e, "Presigning failed after write; stored object is unreferenced");
                Err(e.into())
            }
        }
    }
}

/// Builds a storage key of the form `{nanos}_{hex(16 random bytes)}{ext}`.
///
/// The timestamp orders objects and the random component makes collisions
/// improbable even for uploads landing in the same nanosecond.
fn generate_key(filename: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let mut random = [0u8; KEY_RANDOM_BYTES];
    OsRng.fill_bytes(&mut random);
    format!("{}_{}{}", nanos, hex::encode(random), sanitize_extension(filename))
}

/// Extracts and sanitizes the extension from a client filename: lowercase,
/// truncated, dot included. Missing extensions are fine, the key simply
/// ends without one.
fn sanitize_extension(filename: &str) -> String {
    let ext = match filename.rfind('.') {
        Some(idx) => &filename[idx..],
        None => "",
    };
    ext.chars().take(MAX_EXT_LEN).collect::<String>().to_lowercase()
}
