use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpResponse, HttpServer};
use blob_store::{BlobConfig, BlobStore, S3BlobStore};
use content_service::handlers;
use content_service::services::{AccountDeletionService, PostService};
use content_service::Config;
use document_store::{DocumentStore, PgDocumentStore};
use identity_client::{HttpIdentityProvider, IdentityConfig, IdentityProvider};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn health(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "content-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "content-service"
        })),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let blob: Arc<dyn BlobStore> = Arc::new(S3BlobStore::new(BlobConfig::from_env()).await);
    let documents: Arc<dyn DocumentStore> = Arc::new(PgDocumentStore::new(pool.clone()));
    let identity: Arc<dyn IdentityProvider> =
        Arc::new(HttpIdentityProvider::new(IdentityConfig::from_env()));

    let call_timeout = Duration::from_secs(config.calls.store_call_timeout_secs);
    let post_service = Arc::new(PostService::with_call_timeout(
        blob.clone(),
        documents.clone(),
        call_timeout,
    ));
    let deletion_service = Arc::new(AccountDeletionService::with_call_timeout(
        blob,
        documents,
        identity,
        call_timeout,
    ));

    let bind_addr = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!(addr = %bind_addr, env = %config.app.env, "content-service listening");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(post_service.clone()))
            .app_data(web::Data::new(deletion_service.clone()))
            .route("/health", web::get().to(health))
            .route("/posts", web::post().to(handlers::create_post))
            .route("/posts", web::delete().to(handlers::delete_post))
            .route("/account", web::delete().to(handlers::delete_account))
    })
    .bind(bind_addr)?
    .run()
    .await
}
