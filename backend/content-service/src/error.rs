/// Error types for Content Service
///
/// This module defines all error types that can occur in the content-service.
/// Errors are converted to appropriate HTTP responses for API clients.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use blob_store::BlobError;
use document_store::DocumentError;
use identity_client::IdentityError;
use std::fmt;

/// Result type for content-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Input rejected before any side effect
    Validation(String),

    /// An image upload failed; the post record was not committed
    UploadFailed(String),

    /// Bad credential or unauthorized operation
    Auth(String),

    /// Resource not found (fatal in read paths, tolerated in delete paths)
    NotFound(String),

    /// Generic backend store failure
    Store(String),

    /// Identity provider failure other than bad credentials
    Identity(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::UploadFailed(msg) => write!(f, "Upload failed: {}", msg),
            AppError::Auth(msg) => write!(f, "Authentication error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Store(msg) => write!(f, "Store error: {}", msg),
            AppError::Identity(msg) => write!(f, "Identity provider error: {}", msg),
        }
    }
}

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UploadFailed(_) | AppError::Identity(_) => StatusCode::BAD_GATEWAY,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = self.to_string();

        HttpResponse::build(status).json(serde_json::json!({
            "error": error_msg,
            "status": status.as_u16(),
        }))
    }
}

impl From<BlobError> for AppError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::NotFound(msg) => AppError::NotFound(msg),
            BlobError::Store(msg) => AppError::Store(msg),
        }
    }
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::NotFound { collection, id } => {
                AppError::NotFound(format!("{}/{}", collection, id))
            }
            DocumentError::Database(msg) | DocumentError::Serialization(msg) => {
                AppError::Store(msg)
            }
        }
    }
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidCredentials => {
                AppError::Auth("invalid credentials".to_string())
            }
            other => AppError::Identity(other.to_string()),
        }
    }
}
