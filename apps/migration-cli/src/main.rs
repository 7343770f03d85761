use clap::{Parser, ValueEnum};
use migration::{migrate, MigrationCommand};
use profile_backend::config::db::{DbKind, RuntimeEnv};
use profile_backend::infra::db::connect_db;

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

/// In-memory SQLite is deliberately absent: it would vanish when the
/// command exits.
#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "User profile database migration tool")]
struct Args {
    /// up | down | fresh | reset | refresh | status
    #[arg(value_parser = clap::value_parser!(String))]
    command: String,

    /// Runtime environment
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    /// Database type
    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,profile_backend=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let command: MigrationCommand = match args.command.parse() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let env = match args.env {
        Env::Prod => RuntimeEnv::Prod,
        Env::Test => RuntimeEnv::Test,
    };

    let kind = match args.db {
        Db::Postgres => DbKind::Postgres,
        Db::SqliteFile => DbKind::SqliteFile,
    };

    let conn = match connect_db(env, kind).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Could not connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&conn, command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
