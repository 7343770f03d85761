//! Bearer token validation against the identity provider's keys.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};

use super::claims::{AccessTokenClaims, RawClaims};
use super::error::AuthError;
use super::jwks::{HttpJwksSource, JwksCache, JwksSource};
use crate::config::provider::ProviderConfig;

/// Validate a raw bearer token and, optionally, a required scope.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate(
        &self,
        token: &str,
        required_scope: Option<&str>,
    ) -> Result<AccessTokenClaims, AuthError>;
}

/// RS256 validator pinned to one issuer and audience.
pub struct JwksTokenValidator {
    keys: JwksCache,
    issuer: String,
    audience: String,
    leeway: Duration,
}

impl JwksTokenValidator {
    pub fn new(
        keys: JwksCache,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        leeway: Duration,
    ) -> Self {
        Self {
            keys,
            issuer: issuer.into(),
            audience: audience.into(),
            leeway,
        }
    }

    /// Validator that fetches keys over HTTP from the provider described by `config`.
    pub fn from_config(config: &ProviderConfig, client: reqwest::Client) -> Self {
        let source: Arc<dyn JwksSource> = Arc::new(HttpJwksSource::new(client, config.jwks_url()));
        let keys = JwksCache::new(source, config.jwks_cache_ttl, config.jwks_min_refresh);
        Self::new(keys, config.issuer(), config.audience.clone(), config.token_leeway)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = self.leeway.as_secs();
        validation
    }
}

#[async_trait]
impl TokenValidator for JwksTokenValidator {
    async fn validate(
        &self,
        token: &str,
        required_scope: Option<&str>,
    ) -> Result<AccessTokenClaims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;
        if header.alg != Algorithm::RS256 {
            return Err(AuthError::MalformedToken);
        }
        let kid = header.kid.ok_or(AuthError::MalformedToken)?;

        let jwk = self.keys.find(&kid).await?;
        let key = DecodingKey::from_jwk(&jwk).map_err(|_| AuthError::InvalidSignature)?;

        let data = decode::<RawClaims>(token, &key, &self.validation())?;
        let claims = AccessTokenClaims::try_from(data.claims)?;

        if let Some(scope) = required_scope {
            claims.require_scope(scope)?;
        }

        Ok(claims)
    }
}
