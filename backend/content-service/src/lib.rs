/// Content Service Library
///
/// Orchestrates the Pulse content lifecycle across three independently
/// failing backing stores: the blob store (images), the document store
/// (post and user records) and the identity provider (credentials).
///
/// # Modules
///
/// - `handlers`: HTTP request handlers consumed by the mobile client
/// - `models`: Post/user schema and the document serialization contract
/// - `services`: The creation pipeline and the cascading deletion workflow
/// - `error`: Error taxonomy and HTTP mapping
/// - `config`: Configuration management
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
