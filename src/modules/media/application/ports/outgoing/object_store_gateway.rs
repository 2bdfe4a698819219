use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Signing errors coming from the storage adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignUrlError {
    #[error("there is an infrastructure issue")]
    Infrastructure,
    #[error("access not permitted")]
    AccessDenied,
    #[error("provided bucket does not exist")]
    BucketNotFound,
    #[error("request configuration is invalid")]
    Configuration,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ObjectStoreError {
    #[error("object not found")]
    NotFound,
    #[error("network problem occurred")]
    NetworkInterrupted,
    #[error("there is an infrastructure issue")]
    Infrastructure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHead {
    pub content_type: Option<String>,
    pub byte_size: Option<i64>,
}

/// Wraps an S3-compatible store. All operations are idempotent under their
/// natural semantics: deleting an absent key succeeds.
#[async_trait]
pub trait ObjectStoreGateway: Send + Sync {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<String, SignUrlError>;

    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String, SignUrlError>;

    async fn delete(&self, key: &str) -> Result<(), ObjectStoreError>;

    async fn delete_many(&self, keys: Vec<String>) -> Result<(), ObjectStoreError>;

    async fn download_to(&self, key: &str, path: &Path) -> Result<(), ObjectStoreError>;

    async fn head(&self, key: &str) -> Result<ObjectHead, ObjectStoreError>;
}
