//! Unified test logging initialization
//!
//! Shared by unit tests (via `ctor`) and integration tests (via the support
//! module) so both produce the same quiet, capture-friendly output.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Default filter when neither `TEST_LOG` nor `RUST_LOG` is set.
const DEFAULT_TEST_FILTER: &str = "warn,sqlx=error,sea_orm=error";

/// Initialize structured logging for tests.
///
/// Idempotent; safe to call from every test. Precedence for the filter is
/// `TEST_LOG`, then `RUST_LOG`, then [`DEFAULT_TEST_FILTER`].
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
