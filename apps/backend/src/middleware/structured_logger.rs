//! One `request_completed` event per request.
//!
//! Besides method, path, status and latency the event names the
//! authenticated subject (when `RequireAuth` accepted a token) and the
//! [`ErrorCode`] that `AppError` attached to a failure response, so a
//! rejected or failed request can be diagnosed from this one line.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::auth::AccessTokenClaims;
use crate::errors::ErrorCode;

/// Everything the completion event reports.
#[derive(Debug, PartialEq, Eq)]
struct RequestOutcome {
    method: String,
    path: String,
    status: StatusCode,
    code: Option<ErrorCode>,
    subject: Option<String>,
    duration_us: u64,
}

impl RequestOutcome {
    fn from_response<B>(method: String, path: String, res: &ServiceResponse<B>, started: Instant) -> Self {
        Self {
            method,
            path,
            status: res.status(),
            code: res.response().extensions().get::<ErrorCode>().copied(),
            subject: res
                .request()
                .extensions()
                .get::<AccessTokenClaims>()
                .map(|claims| claims.subject.clone()),
            duration_us: started.elapsed().as_micros() as u64,
        }
    }

    /// A service-level `Err` never reached `AppError` rendering.
    fn from_error(method: String, path: String, err: &Error, started: Instant) -> Self {
        Self {
            method,
            path,
            status: err.as_response_error().status_code(),
            code: None,
            subject: None,
            duration_us: started.elapsed().as_micros() as u64,
        }
    }

    fn emit(&self) {
        let status = self.status.as_u16();
        let code = self.code.map(ErrorCode::as_str).unwrap_or("-");
        let subject = self.subject.as_deref().unwrap_or("-");

        if self.status.is_server_error() {
            error!(http.method = %self.method, url.path = %self.path, http.status_code = status, error.code = code, subject, duration_us = self.duration_us, "request_completed");
        } else if self.status.is_client_error() {
            warn!(http.method = %self.method, url.path = %self.path, http.status_code = status, error.code = code, subject, duration_us = self.duration_us, "request_completed");
        } else {
            info!(http.method = %self.method, url.path = %self.path, http.status_code = status, subject, duration_us = self.duration_us, "request_completed");
        }
    }
}

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let downstream = self.service.call(req);

        Box::pin(async move {
            let result = downstream.await;
            let outcome = match &result {
                Ok(res) => RequestOutcome::from_response(method, path, res, started),
                Err(err) => RequestOutcome::from_error(method, path, err, started),
            };
            outcome.emit();
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use actix_web::{test, web, App, HttpRequest, HttpResponse};
    use time::OffsetDateTime;

    use super::*;
    use crate::error::AppError;

    async fn missing_user() -> Result<HttpResponse, AppError> {
        Err(AppError::not_found(ErrorCode::UserNotFound, "no record"))
    }

    async fn authenticated(req: HttpRequest) -> HttpResponse {
        req.extensions_mut().insert(AccessTokenClaims::new(
            "auth0|ada",
            BTreeSet::new(),
            OffsetDateTime::now_utc(),
        ));
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn failure_outcome_carries_error_code() {
        let app = test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .route("/missing", web::get().to(missing_user)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/missing").to_request()).await;
        let outcome = RequestOutcome::from_response("GET".into(), "/missing".into(), &res, Instant::now());

        assert_eq!(outcome.status, StatusCode::NOT_FOUND);
        assert_eq!(outcome.code, Some(ErrorCode::UserNotFound));
        assert_eq!(outcome.subject, None);
    }

    #[actix_web::test]
    async fn success_outcome_names_authenticated_subject() {
        let app = test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .route("/me", web::get().to(authenticated)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;
        let outcome = RequestOutcome::from_response("GET".into(), "/me".into(), &res, Instant::now());

        assert_eq!(outcome.status, StatusCode::OK);
        assert_eq!(outcome.code, None);
        assert_eq!(outcome.subject.as_deref(), Some("auth0|ada"));
    }
}
