pub mod db;
pub mod provider;
pub mod server;

pub use db::{db_url, DbKind, RuntimeEnv};
pub use provider::ProviderConfig;
pub use server::ServerConfig;
