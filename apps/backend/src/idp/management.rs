//! Client for the provider's management API.
//!
//! Every operation is exactly one HTTP call. Transport errors, non-success
//! statuses and undecodable bodies all collapse into the operation's failure
//! variant; the detail is only for logs.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::provider::ProviderConfig;
use crate::logging::pii::Redacted;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManagementApiError {
    #[error("client credentials exchange failed: {0}")]
    TokenExchangeFailed(String),
    #[error("remote profile fetch failed: {0}")]
    RemoteFetchFailed(String),
    #[error("remote profile update failed: {0}")]
    RemoteUpdateFailed(String),
}

/// Short-lived bearer token for the management API.
#[derive(Clone)]
pub struct ManagementToken(SecretString);

impl ManagementToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for ManagementToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ManagementToken([REDACTED])")
    }
}

/// The provider's user record, as far as the read path needs it. A body
/// without `email` fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteProfile {
    pub email: String,
}

/// Provider's echo of a patched user. Both fields must be present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteProfileUpdated {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteProfilePatch {
    pub name: String,
    pub email: String,
}

#[async_trait]
pub trait ManagementApi: Send + Sync {
    async fn exchange_client_credentials(&self) -> Result<ManagementToken, ManagementApiError>;

    async fn fetch_remote_profile(
        &self,
        subject_id: &str,
        token: &ManagementToken,
    ) -> Result<RemoteProfile, ManagementApiError>;

    async fn patch_remote_profile(
        &self,
        subject_id: &str,
        token: &ManagementToken,
        patch: &RemoteProfilePatch,
    ) -> Result<RemoteProfileUpdated, ManagementApiError>;
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// reqwest-backed management API client.
pub struct Auth0ManagementClient {
    http: Client,
    base_url: String,
    token_url: String,
    client_id: String,
    client_secret: SecretString,
    audience: String,
}

impl Auth0ManagementClient {
    pub fn new(http: Client, config: &ProviderConfig) -> Self {
        Self {
            http,
            base_url: config.base_url(),
            token_url: config.token_url(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            audience: config.management_audience(),
        }
    }

    /// `{base}/api/v2/users/{subject_id}` with the id encoded as one path segment.
    fn user_url(&self, subject_id: &str) -> Result<Url, String> {
        let mut url = Url::parse(&self.base_url).map_err(|e| format!("bad base url: {e}"))?;
        url.path_segments_mut()
            .map_err(|_| "base url cannot carry a path".to_string())?
            .pop_if_empty()
            .extend(["api", "v2", "users", subject_id]);
        Ok(url)
    }
}

#[async_trait]
impl ManagementApi for Auth0ManagementClient {
    async fn exchange_client_credentials(&self) -> Result<ManagementToken, ManagementApiError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
            ("audience", self.audience.as_str()),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| exchange_failed(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(exchange_failed(format!("HTTP {status}")));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| exchange_failed(format!("invalid token response: {e}")))?;

        debug!("management token obtained");
        Ok(ManagementToken::new(body.access_token))
    }

    async fn fetch_remote_profile(
        &self,
        subject_id: &str,
        token: &ManagementToken,
    ) -> Result<RemoteProfile, ManagementApiError> {
        let url = self
            .user_url(subject_id)
            .map_err(ManagementApiError::RemoteFetchFailed)?;

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", token.expose()))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| fetch_failed(subject_id, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_failed(subject_id, format!("HTTP {status}")));
        }

        response
            .json::<RemoteProfile>()
            .await
            .map_err(|e| fetch_failed(subject_id, format!("invalid profile body: {e}")))
    }

    async fn patch_remote_profile(
        &self,
        subject_id: &str,
        token: &ManagementToken,
        patch: &RemoteProfilePatch,
    ) -> Result<RemoteProfileUpdated, ManagementApiError> {
        let url = self
            .user_url(subject_id)
            .map_err(ManagementApiError::RemoteUpdateFailed)?;

        let response = self
            .http
            .patch(url)
            .header(AUTHORIZATION, format!("Bearer {}", token.expose()))
            .header(ACCEPT, "application/json")
            .json(patch)
            .send()
            .await
            .map_err(|e| update_failed(subject_id, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(update_failed(subject_id, format!("HTTP {status}")));
        }

        response
            .json::<RemoteProfileUpdated>()
            .await
            .map_err(|e| update_failed(subject_id, format!("invalid profile body: {e}")))
    }
}

fn exchange_failed(detail: String) -> ManagementApiError {
    warn!(detail = %Redacted(&detail), "management token exchange failed");
    ManagementApiError::TokenExchangeFailed(detail)
}

fn fetch_failed(subject_id: &str, detail: String) -> ManagementApiError {
    warn!(subject_id, detail = %Redacted(&detail), "remote profile fetch failed");
    ManagementApiError::RemoteFetchFailed(detail)
}

fn update_failed(subject_id: &str, detail: String) -> ManagementApiError {
    warn!(subject_id, detail = %Redacted(&detail), "remote profile update failed");
    ManagementApiError::RemoteUpdateFailed(detail)
}
