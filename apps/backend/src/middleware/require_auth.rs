//! Bearer-token guard for individual routes or scopes.
//!
//! ```ignore
//! web::resource("/private-scoped")
//!     .wrap(RequireAuth::scoped("read:messages"))
//!     .route(web::get().to(private_scoped))
//! ```
//!
//! On success the validated [`AccessTokenClaims`] are inserted into request
//! extensions (read them with the `AuthClaims` extractor). On failure the
//! wrapped service is never called and the error is rendered in place.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::LocalBoxFuture;

use crate::auth::{extract_bearer, AccessTokenClaims, AuthError};
use crate::error::AppError;
use crate::logging::security;
use crate::middleware::trace_span::record_subject;
use crate::state::app_state::AppState;

#[derive(Debug, Clone)]
pub struct RequireAuth {
    required_scope: Option<String>,
}

impl RequireAuth {
    /// Any valid token.
    pub fn authenticated() -> Self {
        Self {
            required_scope: None,
        }
    }

    /// A valid token granting every entry of `scope`.
    pub fn scoped(scope: impl Into<String>) -> Self {
        Self {
            required_scope: Some(scope.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware {
            service: Rc::new(service),
            required_scope: self.required_scope.clone(),
        }))
    }
}

pub struct RequireAuthMiddleware<S> {
    service: Rc<S>,
    required_scope: Option<String>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let required_scope = self.required_scope.clone();

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                let err = AppError::internal("application state not registered");
                return Ok(req.error_response(err).map_into_right_body());
            };

            match authenticate(&req, &state, required_scope.as_deref()).await {
                Ok(claims) => {
                    record_subject(&claims.subject);
                    req.extensions_mut().insert(claims);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    if !matches!(err, AuthError::KeySetUnavailable(_)) {
                        security::auth_rejected(&err, req.path());
                    }
                    Ok(req.error_response(AppError::from(err)).map_into_right_body())
                }
            }
        })
    }
}

async fn authenticate(
    req: &ServiceRequest,
    state: &AppState,
    required_scope: Option<&str>,
) -> Result<AccessTokenClaims, AuthError> {
    let token = extract_bearer(req.headers().get(header::AUTHORIZATION))?;
    state.validator.validate(&token, required_scope).await
}
