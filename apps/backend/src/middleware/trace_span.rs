//! Request span shared by every event logged while a request is served.
//!
//! The span carries `trace_id`, `method` and `path` from the start and an
//! initially empty `subject`, filled in by [`record_subject`] once
//! `RequireAuth` has accepted a token. `RequestTrace` must wrap outside this
//! middleware so the trace id is already in request extensions.

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::field::Empty;
use tracing::{info_span, Instrument, Span};

use crate::trace_ctx::TraceId;

/// Record the authenticated subject on the current request span.
pub fn record_subject(subject: &str) {
    Span::current().record("subject", subject);
}

fn request_span(req: &ServiceRequest) -> Span {
    let trace_id = req
        .extensions()
        .get::<TraceId>()
        .map(|id| id.as_str().to_string())
        .unwrap_or_else(|| "missing-trace-id".to_string());

    info_span!(
        "request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.path(),
        subject = Empty,
    )
}

pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let span = request_span(&req);
        Box::pin(self.service.call(req).instrument(span))
    }
}
