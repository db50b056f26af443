//! Shared blob storage client for Pulse services.
//!
//! Provides the `BlobStore` trait used by the content lifecycle workflows,
//! plus the S3-backed production implementation and its configuration.
//! Keys are opaque, namespaced strings (`Post_Images/<id>`,
//! `Profile_Images/<uid>`); the store itself holds no local state.

use async_trait::async_trait;
use thiserror::Error;

pub mod config;
pub mod s3;

pub use config::BlobConfig;
pub use s3::S3BlobStore;

/// Error type for blob store operations
#[derive(Debug, Error)]
pub enum BlobError {
    /// No blob exists under the given key. Delete paths treat this as
    /// success; read paths treat it as fatal.
    #[error("blob not found: {0}")]
    NotFound(String),

    /// Any other backend failure (network, auth, throttling)
    #[error("blob store error: {0}")]
    Store(String),
}

impl BlobError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, BlobError::NotFound(_))
    }
}

/// Key-addressed binary object storage with URL retrieval.
///
/// `put` is an idempotent overwrite; uploading the same key twice is safe.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload an object and return its retrievable URL.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, BlobError>;

    /// Delete the object under `key`. Returns `BlobError::NotFound` when no
    /// such object exists.
    async fn delete(&self, key: &str) -> Result<(), BlobError>;

    /// Retrievable URL for `key`, without touching the backend.
    fn url(&self, key: &str) -> String;
}
