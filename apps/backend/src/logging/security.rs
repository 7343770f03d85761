use tracing::warn;

use crate::auth::AuthError;
use crate::trace_ctx;

/// Log a rejected authentication or authorization attempt.
pub fn auth_rejected(error: &AuthError, path: &str) {
    let trace_id = trace_ctx::trace_id();

    match error {
        AuthError::InsufficientScope { required } => warn!(
            event = "SECURITY_AUTH_REJECTED",
            %trace_id,
            path,
            reason = error.reason(),
            required_scope = %required,
            "Authorization failure"
        ),
        _ => warn!(
            event = "SECURITY_AUTH_REJECTED",
            %trace_id,
            path,
            reason = error.reason(),
            "Authentication failure"
        ),
    }
}
