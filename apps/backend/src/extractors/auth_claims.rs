use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::auth::{AccessTokenClaims, AuthError};
use crate::error::AppError;

/// Claims placed in request extensions by `RequireAuth`.
///
/// Extracting this from a route that is not wrapped in `RequireAuth` yields
/// 401, so a forgotten guard fails closed.
#[derive(Debug, Clone)]
pub struct AuthClaims(pub AccessTokenClaims);

impl AuthClaims {
    pub fn subject(&self) -> &str {
        &self.0.subject
    }
}

impl Deref for AuthClaims {
    type Target = AccessTokenClaims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthClaims {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req
            .extensions()
            .get::<AccessTokenClaims>()
            .cloned()
            .map(AuthClaims)
            .ok_or(AppError::Unauthorized(AuthError::MissingToken));
        ready(claims)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use actix_web::test::TestRequest;
    use time::OffsetDateTime;

    use super::*;

    #[actix_web::test]
    async fn reads_claims_from_extensions() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(AccessTokenClaims::new(
            "auth0|abc",
            BTreeSet::new(),
            OffsetDateTime::now_utc(),
        ));

        let claims = AuthClaims::extract(&req).await.unwrap();
        assert_eq!(claims.subject(), "auth0|abc");
    }

    #[actix_web::test]
    async fn missing_claims_fail_closed() {
        let req = TestRequest::default().to_http_request();
        let err = AuthClaims::extract(&req).await.unwrap_err();
        assert_eq!(err.status().as_u16(), 401);
    }
}
