/// Post handlers - HTTP endpoints for post operations
use std::sync::Arc;

use actix_web::{web, HttpResponse};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{Post, PostAuthor};
use crate::services::PostService;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub text: String,
    /// Base64-encoded, already-compressed image payloads, in display order
    #[serde(default)]
    pub images: Vec<String>,
    pub author: PostAuthor,
}

/// Create a new post
pub async fn create_post(
    service: web::Data<Arc<PostService>>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();

    let mut images = Vec::with_capacity(req.images.len());
    for (index, encoded) in req.images.iter().enumerate() {
        let bytes = STANDARD.decode(encoded).map_err(|e| {
            AppError::Validation(format!("image {} is not valid base64: {}", index, e))
        })?;
        images.push(bytes);
    }

    let post = service.create_post(&req.text, images, &req.author).await?;
    Ok(HttpResponse::Created().json(post))
}

/// Delete a post, standalone (outside account deletion)
pub async fn delete_post(
    service: web::Data<Arc<PostService>>,
    req: web::Json<Post>,
) -> Result<HttpResponse> {
    service.delete_post(&req.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
