//! Test helpers for generating unique test data
//!
//! ULID suffixes keep records created by concurrently running tests apart.

use ulid::Ulid;

/// Generate a unique provider subject id shaped like `{connection}|{id}`
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_subject;
///
/// let sub = unique_subject("auth0");
/// let other = unique_subject("auth0");
/// assert!(sub.starts_with("auth0|"));
/// assert_ne!(sub, other);
/// ```
pub fn unique_subject(connection: &str) -> String {
    format!("{}|{}", connection, Ulid::new().to_string().to_lowercase())
}
