use actix_web::{web, App, HttpServer};
use profile_backend::config::db::{DbKind, RuntimeEnv};
use profile_backend::config::{ProviderConfig, ServerConfig};
use profile_backend::infra::state::build_state;
use profile_backend::middleware::{
    cors_middleware, RequestTrace, StructuredLogger, TraceSpan,
};
use profile_backend::routes;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    profile_backend::telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let server = match ServerConfig::from_env() {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "invalid server configuration");
            std::process::exit(1);
        }
    };

    let provider = match ProviderConfig::from_env() {
        Ok(provider) => provider,
        Err(e) => {
            error!(error = %e, "invalid identity provider configuration");
            std::process::exit(1);
        }
    };

    let db_kind = match DbKind::from_env() {
        Ok(kind) => kind,
        Err(e) => {
            error!(error = %e, "invalid database configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(db_kind)
        .with_provider(provider)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        host = %server.host,
        port = server.port,
        domain = %app_state.provider.domain,
        "starting profile backend"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
