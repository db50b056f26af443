/// Account handlers - HTTP endpoint for cascading account deletion
use std::sync::Arc;

use actix_web::error::ResponseError;
use actix_web::{web, HttpResponse};
use identity_client::Credential;
use serde::{Deserialize, Serialize};

use crate::services::{AccountDeletionService, DeletionReport};

#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    pub uid: String,
    /// Fresh credential collected by the client's confirmation dialog
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct PostWarning {
    post_id: String,
    error: String,
}

#[derive(Debug, Serialize)]
struct DeleteAccountResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<PostWarning>,
}

impl DeleteAccountResponse {
    fn from_report(report: DeletionReport) -> Self {
        let status = if report.is_clean() {
            "done"
        } else {
            "done_with_warnings"
        };
        Self {
            status,
            warnings: report
                .warnings
                .into_iter()
                .map(|w| PostWarning {
                    post_id: w.post_id,
                    error: w.cause.to_string(),
                })
                .collect(),
        }
    }
}

/// Delete the calling user's account and everything that hangs off it.
///
/// The response is always a single terminal outcome: `done`,
/// `done_with_warnings` with the posts that could not be deleted, or an
/// error carrying the stage that failed. A failed deletion is safe to
/// retry from the top.
pub async fn delete_account(
    service: web::Data<Arc<AccountDeletionService>>,
    req: web::Json<DeleteAccountRequest>,
) -> HttpResponse {
    let req = req.into_inner();
    let credential = Credential {
        email: req.email,
        password: req.password,
    };

    match service.delete_account(&req.uid, &credential).await {
        Ok(report) => HttpResponse::Ok().json(DeleteAccountResponse::from_report(report)),
        Err(failure) => {
            let status = failure.cause.status_code();
            HttpResponse::build(status).json(serde_json::json!({
                "status": "failed",
                "stage": failure.stage.to_string(),
                "error": failure.cause.to_string(),
            }))
        }
    }
}
