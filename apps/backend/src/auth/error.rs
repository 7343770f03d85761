use thiserror::Error;

/// Reasons a bearer token can be rejected.
///
/// `InsufficientScope` is an authorization failure (403); `KeySetUnavailable`
/// means the provider's keys could not be obtained at all (500). Everything
/// else is an authentication failure (401).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingToken,
    #[error("malformed bearer token")]
    MalformedToken,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("token issuer, audience or validity window rejected")]
    InvalidClaims,
    #[error("token lacks required scope '{required}'")]
    InsufficientScope { required: String },
    #[error("signing keys unavailable: {0}")]
    KeySetUnavailable(String),
}

impl AuthError {
    pub fn insufficient_scope(required: impl Into<String>) -> Self {
        Self::InsufficientScope {
            required: required.into(),
        }
    }

    /// Short machine-readable reason used in security logs.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing_token",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Expired => "token_expired",
            AuthError::InvalidClaims => "invalid_claims",
            AuthError::InsufficientScope { .. } => "insufficient_scope",
            AuthError::KeySetUnavailable(_) => "jwks_unavailable",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            ErrorKind::InvalidIssuer
            | ErrorKind::InvalidAudience
            | ErrorKind::InvalidSubject
            | ErrorKind::ImmatureSignature
            | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
            _ => AuthError::MalformedToken,
        }
    }
}
