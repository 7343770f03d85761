// Unit tests for error mapping - pure logic without HTTP or database dependencies
use actix_web::ResponseError;

use crate::auth::AuthError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::idp::ManagementApiError;
use crate::{AppError, ErrorCode};

#[test]
fn auth_failures_map_to_401_with_invalid_token_challenge() {
    for (auth, code) in [
        (AuthError::MalformedToken, ErrorCode::UnauthorizedMalformedToken),
        (AuthError::InvalidSignature, ErrorCode::UnauthorizedInvalidSignature),
        (AuthError::Expired, ErrorCode::UnauthorizedExpiredJwt),
        (AuthError::InvalidClaims, ErrorCode::UnauthorizedInvalidClaims),
    ] {
        let app: AppError = auth.into();
        assert_eq!(app.status().as_u16(), 401);
        assert_eq!(app.code(), code);
        assert_eq!(
            app.www_authenticate().as_deref(),
            Some(r#"Bearer error="invalid_token""#)
        );
    }
}

#[test]
fn missing_token_challenge_has_no_error_attribute() {
    let app: AppError = AuthError::MissingToken.into();
    assert_eq!(app.status().as_u16(), 401);
    assert_eq!(app.code(), ErrorCode::UnauthorizedMissingBearer);
    assert_eq!(app.www_authenticate().as_deref(), Some("Bearer"));
}

#[test]
fn insufficient_scope_maps_to_403() {
    let app: AppError = AuthError::insufficient_scope("read:messages").into();
    assert_eq!(app.status().as_u16(), 403);
    assert_eq!(
        app.www_authenticate().as_deref(),
        Some(r#"Bearer error="insufficient_scope", scope="read:messages""#)
    );
}

#[test]
fn unavailable_key_set_is_a_server_error() {
    let app: AppError = AuthError::KeySetUnavailable("HTTP 503".into()).into();
    assert_eq!(app.status().as_u16(), 500);
    assert_eq!(app.code(), ErrorCode::JwksUnavailable);
    assert!(app.www_authenticate().is_none());
}

#[test]
fn management_failures_map_to_500() {
    for (err, code) in [
        (
            ManagementApiError::TokenExchangeFailed("HTTP 401".into()),
            ErrorCode::TokenExchangeFailed,
        ),
        (
            ManagementApiError::RemoteFetchFailed("HTTP 404".into()),
            ErrorCode::RemoteFetchFailed,
        ),
        (
            ManagementApiError::RemoteUpdateFailed("timeout".into()),
            ErrorCode::RemoteUpdateFailed,
        ),
    ] {
        let app: AppError = err.into();
        assert_eq!(app.status().as_u16(), 500);
        assert_eq!(app.code(), code);
    }
}

#[test]
fn domain_errors_map_to_http_statuses() {
    let app: AppError = DomainError::not_found(NotFoundKind::User, "no record").into();
    assert_eq!(app.status().as_u16(), 404);
    assert_eq!(app.code(), ErrorCode::UserNotFound);

    let app: AppError = DomainError::conflict(ConflictKind::UniqueSubject, "dup").into();
    assert_eq!(app.status().as_u16(), 409);
    assert_eq!(app.code(), ErrorCode::UniqueSubject);

    let app: AppError = DomainError::validation("bad").into();
    assert_eq!(app.status().as_u16(), 400);

    let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(app.status().as_u16(), 500);
    assert_eq!(app.code(), ErrorCode::DbUnavailable);
}

#[test]
fn error_response_has_no_body_and_carries_trace_header() {
    let app: AppError = AuthError::Expired.into();
    let response = app.error_response();

    assert_eq!(response.status().as_u16(), 401);
    assert!(response.headers().contains_key("x-trace-id"));
    assert!(response.headers().contains_key("www-authenticate"));
    assert!(response.headers().get("content-type").is_none());
}

#[test]
fn error_response_exposes_code_in_extensions() {
    let app = AppError::upstream(ErrorCode::RemoteFetchFailed, "HTTP 404");
    let response = app.error_response();

    assert_eq!(
        response.extensions().get::<ErrorCode>().copied(),
        Some(ErrorCode::RemoteFetchFailed)
    );
}
