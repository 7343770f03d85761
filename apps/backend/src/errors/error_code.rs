//! Error codes for the profile backend.
//!
//! Every failure path logs exactly one of these codes. Add new codes here;
//! never pass ad-hoc strings as error codes.

use core::fmt;

/// Centralized error codes, rendered as SCREAMING_SNAKE_CASE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No Authorization header
    UnauthorizedMissingBearer,
    /// Authorization header present but not a usable bearer token
    UnauthorizedMalformedToken,
    /// Signature did not verify against the provider's keys
    UnauthorizedInvalidSignature,
    /// Token has expired
    UnauthorizedExpiredJwt,
    /// Issuer, audience or not-before check failed
    UnauthorizedInvalidClaims,
    /// Token lacks the scope required by the endpoint
    ForbiddenInsufficientScope,

    // Request Validation
    /// General bad request error
    BadRequest,
    /// Form body could not be parsed
    InvalidForm,

    // Resource Not Found
    /// No local record for the authenticated subject
    UserNotFound,

    // Conflicts
    /// Subject id already has a local record
    UniqueSubject,
    /// Generic conflict
    Conflict,

    // Upstream (identity provider)
    /// Signing keys could not be fetched
    JwksUnavailable,
    /// Client-credentials exchange failed
    TokenExchangeFailed,
    /// Management API profile read failed
    RemoteFetchFailed,
    /// Management API profile update failed
    RemoteUpdateFailed,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical string representation of this error code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedMalformedToken => "UNAUTHORIZED_MALFORMED_TOKEN",
            Self::UnauthorizedInvalidSignature => "UNAUTHORIZED_INVALID_SIGNATURE",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::UnauthorizedInvalidClaims => "UNAUTHORIZED_INVALID_CLAIMS",
            Self::ForbiddenInsufficientScope => "FORBIDDEN_INSUFFICIENT_SCOPE",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidForm => "INVALID_FORM",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::UniqueSubject => "UNIQUE_SUBJECT",
            Self::Conflict => "CONFLICT",
            Self::JwksUnavailable => "JWKS_UNAVAILABLE",
            Self::TokenExchangeFailed => "TOKEN_EXCHANGE_FAILED",
            Self::RemoteFetchFailed => "REMOTE_FETCH_FAILED",
            Self::RemoteUpdateFailed => "REMOTE_UPDATE_FAILED",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
