//! Database connection bootstrap.

use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbKind, RuntimeEnv};
use crate::error::AppError;

fn engine_name(kind: DbKind) -> &'static str {
    match kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

fn connect_options(url: String, kind: DbKind) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.connect_timeout(Duration::from_secs(5))
        .sqlx_logging(true);

    match kind {
        // Every pooled connection to `sqlite::memory:` would be its own
        // database, so the pool is pinned to a single connection.
        DbKind::SqliteMemory => {
            opts.max_connections(1).min_connections(1);
        }
        DbKind::SqliteFile => {
            opts.max_connections(4);
        }
        DbKind::Postgres => {
            opts.max_connections(10);
        }
    }
    opts
}

/// Connect without touching the schema.
pub async fn connect_db(env: RuntimeEnv, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(env, kind)?;
    let conn = Database::connect(connect_options(url, kind))
        .await
        .map_err(|e| AppError::DbUnavailable {
            detail: format!("connect to {} failed: {e}", engine_name(kind)),
        })?;

    info!(engine = engine_name(kind), ?env, "database connected");
    Ok(conn)
}

/// Connect and, for in-memory SQLite, apply all migrations. Persistent
/// databases are migrated out of band with the migration CLI.
pub async fn bootstrap_db(env: RuntimeEnv, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(env, kind).await?;

    if kind == DbKind::SqliteMemory {
        migrate(&conn, MigrationCommand::Up)
            .await
            .map_err(|e| AppError::db(format!("in-memory migration failed: {e}")))?;
        info!("in-memory schema migrated");
    }

    Ok(conn)
}
