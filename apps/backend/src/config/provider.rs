//! Identity provider settings.

use std::env;
use std::fmt;
use std::time::Duration;

use secrecy::SecretString;

use super::db::must_var;
use crate::error::AppError;

const DEFAULT_JWKS_CACHE_TTL_SECS: u64 = 600;
const DEFAULT_JWKS_MIN_REFRESH_SECS: u64 = 30;
const DEFAULT_TOKEN_LEEWAY_SECS: u64 = 60;
const DEFAULT_IDP_HTTP_TIMEOUT_SECS: u64 = 10;

/// Tenant, API and management-client settings for the identity provider.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Tenant domain, e.g. `tenant.eu.auth0.com`
    pub domain: String,
    /// Expected `aud` of incoming access tokens
    pub audience: String,
    pub client_id: String,
    pub client_secret: SecretString,
    /// Overrides `https://{domain}` for JWKS, token and management calls
    pub base_url_override: Option<String>,
    pub jwks_cache_ttl: Duration,
    pub jwks_min_refresh: Duration,
    pub token_leeway: Duration,
    pub http_timeout: Duration,
}

impl ProviderConfig {
    pub fn new(
        domain: impl Into<String>,
        audience: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            audience: audience.into(),
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            base_url_override: None,
            jwks_cache_ttl: Duration::from_secs(DEFAULT_JWKS_CACHE_TTL_SECS),
            jwks_min_refresh: Duration::from_secs(DEFAULT_JWKS_MIN_REFRESH_SECS),
            token_leeway: Duration::from_secs(DEFAULT_TOKEN_LEEWAY_SECS),
            http_timeout: Duration::from_secs(DEFAULT_IDP_HTTP_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::new(
            must_var("DOMAIN")?,
            must_var("AUDIENCE")?,
            must_var("CLIENT_ID")?,
            must_var("CLIENT_SECRET")?,
        );

        config.base_url_override = env::var("IDP_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());
        config.jwks_cache_ttl = secs_var("JWKS_CACHE_TTL_SECS", DEFAULT_JWKS_CACHE_TTL_SECS)?;
        config.jwks_min_refresh =
            secs_var("JWKS_MIN_REFRESH_SECS", DEFAULT_JWKS_MIN_REFRESH_SECS)?;
        config.token_leeway = secs_var("TOKEN_LEEWAY_SECS", DEFAULT_TOKEN_LEEWAY_SECS)?;
        config.http_timeout = secs_var("IDP_HTTP_TIMEOUT_SECS", DEFAULT_IDP_HTTP_TIMEOUT_SECS)?;

        Ok(config)
    }

    /// `iss` every accepted token must carry.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    pub fn base_url(&self) -> String {
        match &self.base_url_override {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}", self.domain),
        }
    }

    pub fn jwks_url(&self) -> String {
        format!("{}/.well-known/jwks.json", self.base_url())
    }

    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.base_url())
    }

    /// Audience requested in the client-credentials exchange.
    pub fn management_audience(&self) -> String {
        format!("https://{}/api/v2/", self.domain)
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("domain", &self.domain)
            .field("audience", &self.audience)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("base_url_override", &self.base_url_override)
            .field("jwks_cache_ttl", &self.jwks_cache_ttl)
            .field("jwks_min_refresh", &self.jwks_min_refresh)
            .field("token_leeway", &self.token_leeway)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

fn secs_var(name: &str, default: u64) -> Result<Duration, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| AppError::config(format!("{name} must be a whole number of seconds"))),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}
