//! Shared document store client for Pulse services.
//!
//! Collection-based structured record storage with field-equality queries,
//! backed by Postgres JSONB in production. Records travel as
//! `serde_json::Value`; the typed schema and its field names are owned by the
//! calling service, so the serialization contract is versioned independently
//! of this client.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod pg;

pub use pg::PgDocumentStore;

/// Error type for document store operations
#[derive(Debug, Error)]
pub enum DocumentError {
    /// No document exists under the given collection/id. Fatal in read
    /// paths; delete paths never see it (deletes are idempotent).
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// Backend failure
    #[error("database error: {0}")]
    Database(String),

    /// A stored document could not be decoded into the caller's schema
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for DocumentError {
    fn from(err: sqlx::Error) -> Self {
        DocumentError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        DocumentError::Serialization(err.to_string())
    }
}

/// A stored record together with its store-assigned id.
///
/// The id lives outside the document body, mirroring how the store keys
/// records; callers that need it inside their model copy it over after
/// decoding.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub data: serde_json::Value,
}

impl Document {
    /// Decode the document body into a typed record.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DocumentError> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}

/// Collection-based record storage with equality queries.
///
/// Query results carry no ordering guarantee; callers must not assume one.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a record and return its store-assigned id.
    async fn create(&self, collection: &str, data: serde_json::Value)
        -> Result<String, DocumentError>;

    /// Fetch a record by id.
    async fn get(&self, collection: &str, id: &str) -> Result<Document, DocumentError>;

    /// All records whose `field` equals `value`.
    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, DocumentError>;

    /// Delete a record by id. Deleting a missing record succeeds.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), DocumentError>;
}
