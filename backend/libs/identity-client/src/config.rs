//! Identity provider configuration
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Base URL of the identity provider's management API
    pub api_url: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl IdentityConfig {
    /// Load identity provider configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("IDENTITY_API_URL")
                .unwrap_or_else(|_| "https://identity.pulse.dev".to_string()),
            request_timeout_secs: std::env::var("IDENTITY_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}
