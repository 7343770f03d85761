//! RS256 access tokens for tests.
//!
//! `fixtures/signing_key.pem` is the private half of the single key published
//! in `fixtures/jwks.json`; `fixtures/rogue_key.pem` is an unrelated key used
//! to produce tokens whose signature must not verify.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;

/// `kid` of the key published in the fixture JWKS.
pub const TEST_KID: &str = "test-signing-key";
/// Tenant domain the tests configure the backend with.
pub const TEST_DOMAIN: &str = "tenant.example.test";
/// API audience the tests configure the backend with.
pub const TEST_AUDIENCE: &str = "https://api.example.test";

const SIGNING_KEY_PEM: &[u8] = include_bytes!("../fixtures/signing_key.pem");
const ROGUE_KEY_PEM: &[u8] = include_bytes!("../fixtures/rogue_key.pem");
const JWKS_JSON: &str = include_str!("../fixtures/jwks.json");

/// Issuer the backend expects for [`TEST_DOMAIN`].
pub fn test_issuer() -> String {
    format!("https://{TEST_DOMAIN}/")
}

/// The JWKS document the simulated provider serves.
pub fn jwks_json() -> serde_json::Value {
    serde_json::from_str(JWKS_JSON).expect("fixture JWKS should be valid JSON")
}

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    iss: String,
    aud: String,
    iat: u64,
    exp: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
}

/// Builder for test access tokens. Defaults produce a token the backend
/// accepts: correct issuer/audience, known `kid`, one hour of validity.
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    sub: String,
    scope: Option<String>,
    issuer: String,
    audience: String,
    ttl_secs: i64,
    kid: Option<String>,
    rogue: bool,
}

impl TokenBuilder {
    pub fn new(sub: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            scope: None,
            issuer: test_issuer(),
            audience: TEST_AUDIENCE.to_string(),
            ttl_secs: 3600,
            kid: Some(TEST_KID.to_string()),
            rogue: false,
        }
    }

    /// Space-delimited scope claim, e.g. `"openid read:messages"`.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Token that expired two hours ago (well past any leeway).
    pub fn expired(mut self) -> Self {
        self.ttl_secs = -7200;
        self
    }

    pub fn kid(mut self, kid: Option<&str>) -> Self {
        self.kid = kid.map(str::to_string);
        self
    }

    /// Sign with a key that is not in the published JWKS, keeping the known `kid`.
    pub fn signed_by_rogue_key(mut self) -> Self {
        self.rogue = true;
        self
    }

    pub fn build(self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before epoch")
            .as_secs();
        let exp = (now as i64 + self.ttl_secs).max(0) as u64;

        let claims = TestClaims {
            sub: self.sub,
            iss: self.issuer,
            aud: self.audience,
            iat: now,
            exp,
            scope: self.scope,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.kid;

        let pem = if self.rogue { ROGUE_KEY_PEM } else { SIGNING_KEY_PEM };
        let key = EncodingKey::from_rsa_pem(pem).expect("fixture key should be valid PEM");

        encode(&header, &claims, &key).expect("should mint token successfully")
    }

    /// Full `Authorization` header value.
    pub fn bearer(self) -> String {
        format!("Bearer {}", self.build())
    }
}
