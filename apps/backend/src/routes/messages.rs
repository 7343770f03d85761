use actix_web::HttpResponse;
use serde::Serialize;

use crate::extractors::AuthClaims;

pub const PUBLIC_MESSAGE: &str =
    "Hello from a public endpoint! You don't need to be authenticated to see this.";
pub const PRIVATE_MESSAGE: &str =
    "Hello from a private endpoint! You need to be authenticated to see this.";
pub const PRIVATE_SCOPED_MESSAGE: &str = "Hello from a private endpoint! You need to be authenticated and have a scope of read:messages to see this.";

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

fn message(message: &'static str) -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse { message })
}

pub async fn public() -> HttpResponse {
    message(PUBLIC_MESSAGE)
}

pub async fn private(_claims: AuthClaims) -> HttpResponse {
    message(PRIVATE_MESSAGE)
}

pub async fn private_scoped(_claims: AuthClaims) -> HttpResponse {
    message(PRIVATE_SCOPED_MESSAGE)
}
