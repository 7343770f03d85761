use actix_web::error::ResponseError;
use actix_web::http::header;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;
use tracing::{error, warn};

use crate::auth::AuthError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::idp::ManagementApiError;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// HTTP boundary error.
///
/// Rendered without a body: the status, `x-trace-id` and (for 401/403)
/// `WWW-Authenticate` are the whole response. `code` and `detail` go to the
/// log only; the code also rides along in the response extensions.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(AuthError),
    #[error("Forbidden: missing scope '{required_scope}'")]
    Forbidden { required_scope: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Upstream failure: {detail}")]
    Upstream { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable: {detail}")]
    DbUnavailable { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Unauthorized(auth) => match auth {
                AuthError::MissingToken => ErrorCode::UnauthorizedMissingBearer,
                AuthError::InvalidSignature => ErrorCode::UnauthorizedInvalidSignature,
                AuthError::Expired => ErrorCode::UnauthorizedExpiredJwt,
                AuthError::InvalidClaims => ErrorCode::UnauthorizedInvalidClaims,
                _ => ErrorCode::UnauthorizedMalformedToken,
            },
            AppError::Forbidden { .. } => ErrorCode::ForbiddenInsufficientScope,
            AppError::BadRequest { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Upstream { code, .. } => *code,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::DbUnavailable { .. } => ErrorCode::DbUnavailable,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Upstream { .. }
            | AppError::Db { .. }
            | AppError::DbUnavailable { .. }
            | AppError::Internal { .. }
            | AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// RFC 6750 challenge for authentication and authorization failures.
    pub fn www_authenticate(&self) -> Option<String> {
        match self {
            AppError::Unauthorized(AuthError::MissingToken) => Some("Bearer".to_string()),
            AppError::Unauthorized(_) => Some(r#"Bearer error="invalid_token""#.to_string()),
            AppError::Forbidden { required_scope } => Some(format!(
                r#"Bearer error="insufficient_scope", scope="{required_scope}""#
            )),
            _ => None,
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn upstream(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Upstream {
            code,
            detail: detail.into(),
        }
    }

    pub fn forbidden(required_scope: impl Into<String>) -> Self {
        Self::Forbidden {
            required_scope: required_scope.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InsufficientScope { required } => AppError::forbidden(required),
            AuthError::KeySetUnavailable(detail) => {
                AppError::upstream(ErrorCode::JwksUnavailable, detail)
            }
            other => AppError::Unauthorized(other),
        }
    }
}

impl From<ManagementApiError> for AppError {
    fn from(e: ManagementApiError) -> Self {
        let code = match &e {
            ManagementApiError::TokenExchangeFailed(_) => ErrorCode::TokenExchangeFailed,
            ManagementApiError::RemoteFetchFailed(_) => ErrorCode::RemoteFetchFailed,
            ManagementApiError::RemoteUpdateFailed(_) => ErrorCode::RemoteUpdateFailed,
        };
        AppError::upstream(code, e.to_string())
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => AppError::bad_request(ErrorCode::BadRequest, detail),
            DomainError::NotFound(NotFoundKind::User, detail) => {
                AppError::not_found(ErrorCode::UserNotFound, detail)
            }
            DomainError::Conflict(ConflictKind::UniqueSubject, detail) => AppError::Conflict {
                code: ErrorCode::UniqueSubject,
                detail,
            },
            DomainError::Conflict(_, detail) => AppError::Conflict {
                code: ErrorCode::Conflict,
                detail,
            },
            DomainError::Infra(InfraErrorKind::DbUnavailable | InfraErrorKind::Timeout, detail) => {
                AppError::DbUnavailable { detail }
            }
            DomainError::Infra(_, detail) => AppError::db(detail),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e).into()
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();
        let trace_id = trace_ctx::trace_id();
        let detail = self.to_string();

        if status.is_server_error() {
            error!(trace_id = %trace_id, code = %code, status = status.as_u16(), detail = %Redacted(&detail), "request failed");
        } else {
            warn!(trace_id = %trace_id, code = %code, status = status.as_u16(), detail = %Redacted(&detail), "request rejected");
        }

        let mut response = HttpResponse::build(status);
        response.insert_header(("x-trace-id", trace_id));
        if let Some(challenge) = self.www_authenticate() {
            response.insert_header((header::WWW_AUTHENTICATE, challenge));
        }
        let mut response = response.finish();
        // Read back by `StructuredLogger` for the completion event
        response.extensions_mut().insert(code);
        response
    }
}
