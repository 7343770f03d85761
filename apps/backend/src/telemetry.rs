//! Process-wide tracing subscriber for the server binary.
//!
//! `LOG_FORMAT=pretty` switches to human-readable output for local runs;
//! anything else (or unset) logs JSON with the enclosing request span, so
//! every line carries `trace_id` and, once authenticated, `subject`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info,actix_web=info,sqlx=warn,sea_orm=warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("pretty") => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }

    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let registry = tracing_subscriber::registry().with(env_filter());

    match LogFormat::from_env() {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(false),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(false).with_ansi(true))
            .init(),
    }
}
