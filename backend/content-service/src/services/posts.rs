/// Post service - handles post creation and deletion
use std::sync::Arc;
use std::time::Duration;

use blob_store::{BlobError, BlobStore};
use document_store::DocumentStore;

use crate::error::{AppError, Result};
use crate::models::{Post, PostAuthor, POSTS_COLLECTION};
use crate::services::{bounded, post_image_key, CallError, DEFAULT_CALL_TIMEOUT};

/// Content type of the compressed image payloads handed in by callers
const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

pub struct PostService {
    blob: Arc<dyn BlobStore>,
    documents: Arc<dyn DocumentStore>,
    call_timeout: Duration,
}

impl PostService {
    pub fn new(blob: Arc<dyn BlobStore>, documents: Arc<dyn DocumentStore>) -> Self {
        Self::with_call_timeout(blob, documents, DEFAULT_CALL_TIMEOUT)
    }

    pub fn with_call_timeout(
        blob: Arc<dyn BlobStore>,
        documents: Arc<dyn DocumentStore>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            blob,
            documents,
            call_timeout,
        }
    }

    /// Create a post from user-authored text and zero or more compressed
    /// images.
    ///
    /// Images are uploaded first, in input order, each under a fresh
    /// `Post_Images/<uuid>` key; the record is committed only once every
    /// upload has succeeded, so a post visible to readers always references
    /// fully-uploaded blobs.
    ///
    /// If any upload fails the whole operation aborts with `UploadFailed`
    /// and no record is committed. Blobs uploaded before the failure are
    /// not rolled back, and a record commit failure likewise strands the
    /// uploaded blobs. Known limitation: a compensating delete sweep for
    /// those orphans does not exist yet.
    pub async fn create_post(
        &self,
        text: &str,
        images: Vec<Vec<u8>>,
        author: &PostAuthor,
    ) -> Result<Post> {
        if text.is_empty() && images.is_empty() {
            return Err(AppError::Validation(
                "post must contain text or at least one image".to_string(),
            ));
        }

        let mut post = Post::new(text, author);

        for (index, bytes) in images.into_iter().enumerate() {
            let key = post_image_key();
            let label = format!("upload of image {}", index);
            let url = bounded(self.call_timeout, &label, self.blob.put(&key, bytes, IMAGE_CONTENT_TYPE))
                .await
                .map_err(|e| AppError::UploadFailed(e.to_string()))?;

            // Parallel arrays stay in input order.
            post.image_reference_ids.push(key);
            post.image_urls.push(url);
        }

        let data = serde_json::to_value(&post).map_err(|e| AppError::Store(e.to_string()))?;
        let id = bounded(
            self.call_timeout,
            "post record commit",
            self.documents.create(POSTS_COLLECTION, data),
        )
        .await
        .map_err(CallError::into_app)?;
        post.id = Some(id);

        tracing::info!(
            user_uid = %post.user_uid,
            post_id = %post.id.as_deref().unwrap_or(""),
            images = post.image_urls.len(),
            "post created"
        );
        Ok(post)
    }

    /// Delete a post: every referenced image blob first, then the record.
    ///
    /// Blobs that are already gone are treated as deleted, which makes the
    /// operation idempotent. Comments and other sub-resources attached to
    /// the post are not touched; cleaning those up is an unresolved gap,
    /// not an implicit guarantee.
    pub async fn delete_post(&self, post: &Post) -> Result<()> {
        for key in &post.image_reference_ids {
            let label = format!("delete of blob {}", key);
            match bounded(self.call_timeout, &label, self.blob.delete(key)).await {
                Ok(()) => {}
                Err(e) if e.inner().map_or(false, BlobError::is_not_found) => {
                    tracing::debug!(key = %key, "post image already gone");
                }
                Err(e) => return Err(e.into_app()),
            }
        }

        // A post that never reached the store has nothing left to delete.
        let Some(id) = post.id.as_deref() else {
            return Ok(());
        };

        bounded(
            self.call_timeout,
            "post record delete",
            self.documents.delete(POSTS_COLLECTION, id),
        )
        .await
        .map_err(CallError::into_app)?;

        tracing::info!(post_id = %id, "post deleted");
        Ok(())
    }
}
