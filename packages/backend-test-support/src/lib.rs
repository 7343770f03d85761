//! Backend test support utilities
//!
//! Shared by the backend's unit and integration tests: unified logging
//! initialization, unique test data, and RSA signing fixtures that match the
//! JWKS served by the simulated identity provider.

pub mod test_logging;
pub mod tokens;
pub mod unique_helpers;
