//! Identity provider client for Pulse services.
//!
//! Wraps the hosted identity provider's management API: credential-based
//! reauthentication and current-identity deletion. Deleting the identity is
//! the step that revokes login, so account-deletion workflows call it last,
//! after every store operation that still needs an authenticated identity.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;
pub mod http;

pub use config::IdentityConfig;
pub use http::HttpIdentityProvider;

pub type Result<T> = std::result::Result<T, IdentityError>;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("identity provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(String),
}

impl From<reqwest::Error> for IdentityError {
    fn from(err: reqwest::Error) -> Self {
        IdentityError::Http(err.to_string())
    }
}

/// Credential collected by the caller's authentication challenge UI.
#[derive(Debug, Clone, Serialize)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

/// Short-lived token returned by reauthentication, required to authorize
/// identity deletion.
#[derive(Clone, Deserialize)]
pub struct ReauthToken(pub String);

impl std::fmt::Debug for ReauthToken {
    // Never log token material
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ReauthToken(***)")
    }
}

/// Authentication and identity lifecycle service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange a fresh credential for a reauthentication token.
    /// Fails with `InvalidCredentials` on a bad credential.
    async fn reauthenticate(&self, uid: &str, credential: &Credential) -> Result<ReauthToken>;

    /// Permanently delete the identity. Revokes login; irreversible.
    async fn delete_identity(&self, uid: &str, token: &ReauthToken) -> Result<()>;
}
