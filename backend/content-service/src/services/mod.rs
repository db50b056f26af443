/// Business logic layer for content-service
///
/// This module provides the two content lifecycle workflows:
/// - Post service: multi-image post creation and standalone post deletion
/// - Account deletion service: the cascading delete across blob store,
///   document store and identity provider
use std::fmt;
use std::future::Future;
use std::time::Duration;

use uuid::Uuid;

use crate::error::AppError;

pub mod account_deletion;
pub mod posts;

pub use account_deletion::{
    AccountDeletionService, DeletionFailure, DeletionReport, DeletionStage, PostDeletionFailure,
};
pub use posts::PostService;

/// Timeout applied to each external store call when none is configured
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Blob key for a new post image. Random so two images uploaded by the same
/// user in the same instant can never collide.
pub fn post_image_key() -> String {
    format!("Post_Images/{}", Uuid::new_v4())
}

/// Blob key of a user's profile image
pub fn profile_image_key(uid: &str) -> String {
    format!("Profile_Images/{}", uid)
}

/// Failure of a single bounded store call: either the call itself failed or
/// it outlived the configured timeout.
#[derive(Debug)]
pub(crate) enum CallError<E> {
    TimedOut(String),
    Failed(E),
}

impl<E> CallError<E> {
    pub(crate) fn inner(&self) -> Option<&E> {
        match self {
            CallError::Failed(err) => Some(err),
            CallError::TimedOut(_) => None,
        }
    }
}

impl<E> CallError<E>
where
    AppError: From<E>,
{
    pub(crate) fn into_app(self) -> AppError {
        match self {
            CallError::Failed(err) => AppError::from(err),
            CallError::TimedOut(label) => AppError::Store(format!("{} timed out", label)),
        }
    }
}

impl<E: fmt::Display> fmt::Display for CallError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::TimedOut(label) => write!(f, "{} timed out", label),
            CallError::Failed(err) => err.fmt(f),
        }
    }
}

/// Run an external store call under the configured timeout. A timed out call
/// fails like any other store error; the surrounding workflow stays
/// retryable from the top.
pub(crate) async fn bounded<T, E>(
    timeout: Duration,
    label: &str,
    fut: impl Future<Output = std::result::Result<T, E>>,
) -> std::result::Result<T, CallError<E>> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(CallError::Failed(err)),
        Err(_) => Err(CallError::TimedOut(label.to_string())),
    }
}
