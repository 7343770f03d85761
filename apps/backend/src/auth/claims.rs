//! Claims attached to an authenticated request.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::error::AuthError;

/// Wire shape of the provider's access token payload. Issuer and audience are
/// checked by `jsonwebtoken` during decoding and are not kept.
#[derive(Debug, Deserialize)]
pub(crate) struct RawClaims {
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Request-scoped view of a validated access token, inserted into request
/// extensions by the `RequireAuth` middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessTokenClaims {
    /// Provider-issued subject id (`sub`)
    pub subject: String,
    pub scopes: BTreeSet<String>,
    #[serde(with = "time::serde::timestamp")]
    pub expires_at: OffsetDateTime,
}

impl AccessTokenClaims {
    pub fn new(subject: impl Into<String>, scopes: BTreeSet<String>, expires_at: OffsetDateTime) -> Self {
        Self {
            subject: subject.into(),
            scopes,
            expires_at,
        }
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    /// Every space-delimited entry of `required` must be granted.
    pub fn require_scope(&self, required: &str) -> Result<(), AuthError> {
        if parse_scopes(required).iter().all(|s| self.has_scope(s)) {
            Ok(())
        } else {
            Err(AuthError::insufficient_scope(required))
        }
    }
}

impl TryFrom<RawClaims> for AccessTokenClaims {
    type Error = AuthError;

    fn try_from(raw: RawClaims) -> Result<Self, Self::Error> {
        let expires_at =
            OffsetDateTime::from_unix_timestamp(raw.exp).map_err(|_| AuthError::MalformedToken)?;
        let scopes = raw.scope.as_deref().map(parse_scopes).unwrap_or_default();

        Ok(Self {
            subject: raw.sub,
            scopes,
            expires_at,
        })
    }
}

/// Split an OAuth2 `scope` string (RFC 6749 §3.3) into its entries.
pub fn parse_scopes(scope: &str) -> BTreeSet<String> {
    scope.split_whitespace().map(str::to_string).collect()
}
