use backend_test_support::tokens::{TEST_AUDIENCE, TEST_DOMAIN};
use profile_backend::config::db::{DbKind, RuntimeEnv};
use profile_backend::config::ProviderConfig;
use profile_backend::infra::state::{build_state, StateBuilder};
use profile_backend::state::app_state::AppState;

use super::idp_mock::MockIdp;

pub fn test_provider(idp: &MockIdp) -> ProviderConfig {
    ProviderConfig::new(TEST_DOMAIN, TEST_AUDIENCE, "test-client", "test-secret")
        .with_base_url(idp.uri())
}

/// Fresh in-memory database, provider pointed at `idp`.
pub fn test_state_builder(idp: &MockIdp) -> StateBuilder {
    backend_test_support::test_logging::init();
    build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbKind::SqliteMemory)
        .with_provider(test_provider(idp))
}

pub async fn build_test_state(idp: &MockIdp) -> AppState {
    test_state_builder(idp)
        .build()
        .await
        .expect("test state should build")
}
