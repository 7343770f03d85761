use std::env;

use actix_cors::Cors;
use actix_web::http::header;

const FALLBACK_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Parse a comma-separated origin list, dropping blanks, `null` and
/// anything that is not http(s).
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}

/// CORS for the browser SPA, origins from `CORS_ALLOWED_ORIGINS`
/// (localhost:3000 when unset or empty).
pub fn cors_middleware() -> Cors {
    let mut origins = parse_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());
    if origins.is_empty() {
        origins = FALLBACK_ORIGINS.iter().map(|s| s.to_string()).collect();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
            header::WWW_AUTHENTICATE,
        ])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(&origin);
    }

    cors
}
