//! Postgres JSONB document store implementation
//!
//! All collections share one `documents` table keyed by
//! `(collection, id)`, with the record body in a JSONB column. Equality
//! queries go through the `->>` operator so any top-level text field is
//! queryable without schema changes.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{Document, DocumentError, DocumentStore};

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create(
        &self,
        collection: &str,
        data: serde_json::Value,
    ) -> Result<String, DocumentError> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(collection)
        .bind(&id)
        .bind(&data)
        .execute(&self.pool)
        .await?;

        tracing::debug!(collection = %collection, id = %id, "document created");
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Document, DocumentError> {
        let row = sqlx::query_as::<_, (String, serde_json::Value)>(
            r#"
            SELECT id, data
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((id, data)) => Ok(Document { id, data }),
            None => Err(DocumentError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            }),
        }
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, DocumentError> {
        let rows = sqlx::query_as::<_, (String, serde_json::Value)>(
            r#"
            SELECT id, data
            FROM documents
            WHERE collection = $1 AND data->>$2 = $3
            "#,
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, data)| Document { id, data })
            .collect())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), DocumentError> {
        let result = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(collection = %collection, id = %id, "document already gone");
        } else {
            tracing::debug!(collection = %collection, id = %id, "document deleted");
        }

        Ok(())
    }
}
