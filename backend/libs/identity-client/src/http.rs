//! HTTP client for the hosted identity provider
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::config::IdentityConfig;
use crate::{Credential, IdentityError, IdentityProvider, ReauthToken, Result};

/// Identity provider backed by the management API over HTTPS.
#[derive(Clone)]
pub struct HttpIdentityProvider {
    config: IdentityConfig,
    http: Client,
}

#[derive(Deserialize)]
struct ReauthResponse {
    token: String,
}

impl HttpIdentityProvider {
    pub fn new(config: IdentityConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        info!(api_url = %config.api_url, "identity provider client initialized");
        Self { config, http }
    }

    /// Map a non-success response to the client error taxonomy.
    fn error_for_status(status: u16, message: String) -> IdentityError {
        match status {
            401 | 403 => IdentityError::InvalidCredentials,
            _ => IdentityError::Provider { status, message },
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn reauthenticate(&self, uid: &str, credential: &Credential) -> Result<ReauthToken> {
        let url = format!("{}/v1/users/{}/reauthenticate", self.config.api_url, uid);

        debug!(uid = %uid, "reauthenticating");

        let response = self.http.post(&url).json(credential).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            error!(uid = %uid, status = %status, "reauthentication rejected");
            return Err(Self::error_for_status(status.as_u16(), body));
        }

        let body: ReauthResponse = response.json().await?;
        Ok(ReauthToken(body.token))
    }

    async fn delete_identity(&self, uid: &str, token: &ReauthToken) -> Result<()> {
        let url = format!("{}/v1/users/{}", self.config.api_url, uid);

        let response = self
            .http
            .delete(&url)
            .bearer_auth(&token.0)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            error!(uid = %uid, status = %status, "identity deletion rejected");
            return Err(Self::error_for_status(status.as_u16(), body));
        }

        info!(uid = %uid, "identity deleted");
        Ok(())
    }
}
