//! S3-backed blob store implementation
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::config::BlobConfig;
use crate::{BlobError, BlobStore};

/// Blob store backed by S3 (or any S3-compatible object store).
#[derive(Clone)]
pub struct S3BlobStore {
    client: Arc<Client>,
    config: BlobConfig,
}

impl S3BlobStore {
    /// Create a new client with credentials loaded from the environment.
    pub async fn new(config: BlobConfig) -> Self {
        let aws_config = aws_config::load_from_env().await;
        let client = Client::new(&aws_config);

        Self {
            client: Arc::new(client),
            config,
        }
    }

    /// Get the blob configuration
    pub fn config(&self) -> &BlobConfig {
        &self.config
    }

    /// Health check for bucket connectivity
    pub async fn health_check(&self) -> Result<(), BlobError> {
        self.client
            .head_bucket()
            .bucket(&self.config.bucket)
            .send()
            .await
            .map_err(|e| BlobError::Store(e.to_string()))?;

        Ok(())
    }

    fn classify(message: String) -> BlobError {
        // The SDK does not expose a typed not-found for every operation, so
        // fall back to matching the service error text.
        if message.contains("NoSuchKey") || message.contains("NotFound") || message.contains("404")
        {
            BlobError::NotFound(message)
        } else {
            BlobError::Store(message)
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, BlobError> {
        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| BlobError::Store(e.to_string()))?;

        tracing::debug!(key = %key, "blob uploaded");
        Ok(self.config.cdn_url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        // Verify existence first: S3 deletes of missing keys succeed
        // silently, but callers distinguish not-found from other failures.
        self.client
            .head_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Self::classify(e.to_string()))?;

        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Self::classify(e.to_string()))?;

        tracing::debug!(key = %key, "blob deleted");
        Ok(())
    }

    fn url(&self, key: &str) -> String {
        self.config.cdn_url(key)
    }
}
