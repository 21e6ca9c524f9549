//! Storage configuration

/// Object storage configuration
///
/// `public_endpoint` exists for deployments where the storage node's
/// internal address differs from the one clients can reach: writes go to
/// `endpoint`, presigned URLs are minted against `public_endpoint`.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Internal endpoint used for writes
    pub endpoint: String,
    /// Externally reachable endpoint used only for presigned URLs;
    /// falls back to `endpoint` when unset
    pub public_endpoint: Option<String>,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub region: String,
}
