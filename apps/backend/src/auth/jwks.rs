//! Provider signing keys (JWKS) with a time-bounded cache.
//!
//! The key set is fetched lazily and kept for `ttl`. Concurrent misses share
//! one fetch. A token whose `kid` is not in the cached set triggers one forced
//! refresh, at most once per `min_refresh_interval`, to pick up key rotation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use moka::future::Cache;
use parking_lot::Mutex;
use tracing::{debug, warn};

use super::error::AuthError;

const JWKS_CACHE_KEY: &str = "jwks";

/// Where signing keys come from.
#[async_trait]
pub trait JwksSource: Send + Sync {
    async fn fetch(&self) -> Result<JwkSet, AuthError>;
}

/// Fetches `https://{domain}/.well-known/jwks.json` (or an overridden base).
pub struct HttpJwksSource {
    client: reqwest::Client,
    url: String,
}

impl HttpJwksSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl JwksSource for HttpJwksSource {
    async fn fetch(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::KeySetUnavailable(format!("HTTP {status}")));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::KeySetUnavailable(format!("invalid JWKS body: {e}")))
    }
}

pub struct JwksCache {
    source: Arc<dyn JwksSource>,
    cache: Cache<&'static str, Arc<JwkSet>>,
    min_refresh_interval: Duration,
    last_forced_refresh: Mutex<Option<Instant>>,
}

impl JwksCache {
    pub fn new(source: Arc<dyn JwksSource>, ttl: Duration, min_refresh_interval: Duration) -> Self {
        let cache = Cache::builder().max_capacity(1).time_to_live(ttl).build();

        Self {
            source,
            cache,
            min_refresh_interval,
            last_forced_refresh: Mutex::new(None),
        }
    }

    /// Current key set, fetching it if the cached copy is missing or stale.
    pub async fn keys(&self) -> Result<Arc<JwkSet>, AuthError> {
        let source = Arc::clone(&self.source);
        self.cache
            .try_get_with(JWKS_CACHE_KEY, async move {
                debug!("fetching provider signing keys");
                source.fetch().await.map(Arc::new)
            })
            .await
            .map_err(|e| {
                warn!(error = %e, "failed to fetch provider signing keys");
                (*e).clone()
            })
    }

    /// Look up the key for `kid`. An unknown `kid` refreshes the set once
    /// (rate limited) before being reported as `InvalidSignature`.
    pub async fn find(&self, kid: &str) -> Result<Jwk, AuthError> {
        let keys = self.keys().await?;
        if let Some(jwk) = keys.find(kid) {
            return Ok(jwk.clone());
        }

        if !self.claim_forced_refresh() {
            debug!(kid, "unknown kid; forced refresh suppressed");
            return Err(AuthError::InvalidSignature);
        }

        debug!(kid, "unknown kid; refreshing signing keys");
        self.cache.invalidate(JWKS_CACHE_KEY).await;
        let keys = self.keys().await?;
        keys.find(kid).cloned().ok_or(AuthError::InvalidSignature)
    }

    /// Drop the cached key set.
    pub async fn invalidate(&self) {
        self.cache.invalidate(JWKS_CACHE_KEY).await;
    }

    fn claim_forced_refresh(&self) -> bool {
        let mut last = self.last_forced_refresh.lock();
        match *last {
            Some(at) if at.elapsed() < self.min_refresh_interval => false,
            _ => {
                *last = Some(Instant::now());
                true
            }
        }
    }
}
