//! Object store abstraction and the S3-compatible implementation

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;

use crate::config::StorageConfig;
use crate::error::StoreError;

/// Durable object storage
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes `data` under `key`. Overwrites silently; key generation is
    /// responsible for making collisions improbable.
    async fn upload(
        &self,
        key: &str,
        data: Bytes,
        size: u64,
        content_type: &str,
    ) -> Result<(), StoreError>;

    /// Mints a retrieval URL for `key` that expires after `ttl`.
    async fn presigned_url(&self, key: &str, ttl: Duration) -> Result<String, StoreError>;
}

/// S3-compatible object store (MinIO in development, S3 proper elsewhere)
///
/// Two clients because writes and presigning may need different endpoints:
/// the service reaches storage over an internal address, while presigned
/// URLs must resolve from the client's side of the network.
pub struct S3ObjectStore {
    writer: Client,
    presigner: Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(config: &StorageConfig) -> Self {
        let public_endpoint = config
            .public_endpoint
            .clone()
            .unwrap_or_else(|| config.endpoint.clone());
        S3ObjectStore {
            writer: build_client(config, &config.endpoint),
            presigner: build_client(config, &public_endpoint),
            bucket: config.bucket.clone(),
        }
    }
}

fn build_client(config: &StorageConfig, endpoint: &str) -> Client {
    let credentials = Credentials::new(
        config.access_key.clone(),
        config.secret_key.clone(),
        None,
        None,
        "static",
    );
    let conf = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .endpoint_url(endpoint)
        .credentials_provider(credentials)
        // MinIO and most S3-compatible stores route by path, not subdomain
        .force_path_style(true)
        .build();
    Client::from_conf(conf)
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload(
        &self,
        key: &str,
        data: Bytes,
        size: u64,
        content_type: &str,
    ) -> Result<(), StoreError> {
        self.writer
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_length(size as i64)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;
        Ok(())
    }

    async fn presigned_url(&self, key: &str, ttl: Duration) -> Result<String, StoreError> {
        let presigning = PresigningConfig::expires_in(ttl)
            .map_err(|e| StoreError::Presign(e.to_string()))?;
        let request = self
            .presigner
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| StoreError::Presign(e.to_string()))?;
        Ok(request.uri().to_string())
    }
}
