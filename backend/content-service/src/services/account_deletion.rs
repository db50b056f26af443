/// Account deletion service - the cascading delete across all three stores
///
/// Deletion runs as an ordered sequence of stages:
/// reauthenticate -> resolve posts -> delete posts -> delete profile image
/// -> delete user record -> delete identity. The identity goes last because
/// every earlier step still needs it authenticated to authorize deletes.
///
/// Failure semantics are stage-tagged and first-class: per-post failures are
/// collected as warnings and the remaining posts still run; every other
/// stage failure aborts with the stage that caused it. A fatal failure
/// leaves the identity intact, so the whole operation can be retried from
/// the top - resources deleted by an earlier attempt tolerate not-found.
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use blob_store::{BlobError, BlobStore};
use document_store::{Document, DocumentStore};
use identity_client::{Credential, IdentityProvider};

use crate::error::{AppError, Result};
use crate::models::{Post, POSTS_COLLECTION, USERS_COLLECTION};
use crate::services::{bounded, profile_image_key, CallError, PostService, DEFAULT_CALL_TIMEOUT};

/// Stages of the account deletion workflow, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionStage {
    Reauthenticate,
    ResolvePosts,
    DeletePosts,
    DeleteProfileImage,
    DeleteUserRecord,
    DeleteIdentity,
}

impl fmt::Display for DeletionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeletionStage::Reauthenticate => "reauthenticate",
            DeletionStage::ResolvePosts => "resolve_posts",
            DeletionStage::DeletePosts => "delete_posts",
            DeletionStage::DeleteProfileImage => "delete_profile_image",
            DeletionStage::DeleteUserRecord => "delete_user_record",
            DeletionStage::DeleteIdentity => "delete_identity",
        };
        f.write_str(name)
    }
}

/// Fatal, stage-tagged failure of the whole workflow
#[derive(Debug)]
pub struct DeletionFailure {
    pub stage: DeletionStage,
    pub cause: AppError,
}

impl fmt::Display for DeletionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account deletion failed at {}: {}", self.stage, self.cause)
    }
}

/// A post that could not be fully deleted; the rest of the account was
/// still processed
#[derive(Debug)]
pub struct PostDeletionFailure {
    pub post_id: String,
    pub cause: AppError,
}

/// Terminal result of a successful run. `warnings` lists the posts that
/// failed; an empty list means the cascade was complete.
#[derive(Debug, Default)]
pub struct DeletionReport {
    pub warnings: Vec<PostDeletionFailure>,
}

impl DeletionReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

pub struct AccountDeletionService {
    blob: Arc<dyn BlobStore>,
    documents: Arc<dyn DocumentStore>,
    identity: Arc<dyn IdentityProvider>,
    posts: PostService,
    call_timeout: Duration,
}

impl AccountDeletionService {
    pub fn new(
        blob: Arc<dyn BlobStore>,
        documents: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self::with_call_timeout(blob, documents, identity, DEFAULT_CALL_TIMEOUT)
    }

    pub fn with_call_timeout(
        blob: Arc<dyn BlobStore>,
        documents: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            posts: PostService::with_call_timeout(blob.clone(), documents.clone(), call_timeout),
            blob,
            documents,
            identity,
            call_timeout,
        }
    }

    /// Delete the account identified by `uid`, with everything that hangs
    /// off it.
    pub async fn delete_account(
        &self,
        uid: &str,
        credential: &Credential,
    ) -> std::result::Result<DeletionReport, DeletionFailure> {
        // Stage 1: reauthenticate. Nothing has been deleted yet, so a bad
        // credential aborts with no partial state.
        let token = bounded(
            self.call_timeout,
            "reauthentication",
            self.identity.reauthenticate(uid, credential),
        )
        .await
        .map_err(|e| DeletionFailure {
            stage: DeletionStage::Reauthenticate,
            cause: e.into_app(),
        })?;

        // Stage 2: resolve the user's posts. Result order is not
        // guaranteed and does not matter; posts are independent subtrees.
        let post_docs = bounded(
            self.call_timeout,
            "post lookup",
            self.documents.query_eq(POSTS_COLLECTION, "userUID", uid),
        )
        .await
        .map_err(|e| DeletionFailure {
            stage: DeletionStage::ResolvePosts,
            cause: e.into_app(),
        })?;

        // Stage 3: delete each post. A failed post is recorded and the
        // remaining posts still run.
        let mut report = DeletionReport::default();
        for doc in post_docs {
            let post_id = doc.id.clone();
            if let Err(cause) = self.delete_post_document(doc).await {
                tracing::warn!(
                    post_id = %post_id,
                    error = %cause,
                    "post deletion failed, continuing with remaining posts"
                );
                report.warnings.push(PostDeletionFailure { post_id, cause });
            }
        }

        // Stage 4: profile image. Already-gone is fine.
        let profile_key = profile_image_key(uid);
        match bounded(
            self.call_timeout,
            "profile image delete",
            self.blob.delete(&profile_key),
        )
        .await
        {
            Ok(()) => {}
            Err(e) if e.inner().map_or(false, BlobError::is_not_found) => {
                tracing::debug!(key = %profile_key, "profile image already gone");
            }
            Err(e) => {
                return Err(DeletionFailure {
                    stage: DeletionStage::DeleteProfileImage,
                    cause: e.into_app(),
                })
            }
        }

        // Stage 5: user record.
        bounded(
            self.call_timeout,
            "user record delete",
            self.documents.delete(USERS_COLLECTION, uid),
        )
        .await
        .map_err(|e| DeletionFailure {
            stage: DeletionStage::DeleteUserRecord,
            cause: e.into_app(),
        })?;

        // Stage 6: identity, last. This revokes login; the caller clears
        // its local session state afterwards.
        bounded(
            self.call_timeout,
            "identity delete",
            self.identity.delete_identity(uid, &token),
        )
        .await
        .map_err(|e| DeletionFailure {
            stage: DeletionStage::DeleteIdentity,
            cause: e.into_app(),
        })?;

        tracing::info!(
            user_uid = %uid,
            failed_posts = report.warnings.len(),
            "account deleted"
        );
        Ok(report)
    }

    async fn delete_post_document(&self, doc: Document) -> Result<()> {
        let id = doc.id.clone();
        let mut post: Post = doc.decode().map_err(AppError::from)?;
        post.id = Some(id);
        self.posts.delete_post(&post).await
    }
}
