#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod idp;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use auth::{AccessTokenClaims, AuthError, JwksTokenValidator, TokenValidator};
pub use config::db::{db_url, DbKind, RuntimeEnv};
pub use config::provider::ProviderConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::{AuthClaims, ValidatedForm};
pub use idp::{Auth0ManagementClient, ManagementApi, ManagementApiError};
pub use infra::db::connect_db;
pub use middleware::{cors_middleware, RequestTrace, RequireAuth, StructuredLogger, TraceSpan};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
