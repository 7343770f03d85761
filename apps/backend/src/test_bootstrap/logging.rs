//! Unit-test logging, shared with the integration tests through
//! `backend_test_support::test_logging`.

/// Idempotent; filter from `TEST_LOG`, then `RUST_LOG`, else quiet.
pub fn init() {
    backend_test_support::test_logging::init();
}
