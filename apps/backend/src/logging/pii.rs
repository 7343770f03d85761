//! Masking of personal data and credentials in log output.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// Patterns are literals covered by the tests below.
#[allow(clippy::unwrap_used)]
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap());

/// Three base64url segments, i.e. a compact JWS.
#[allow(clippy::unwrap_used)]
static JWT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\beyJ[A-Za-z0-9_-]{4,}\.[A-Za-z0-9_-]{4,}\.[A-Za-z0-9_-]*").unwrap()
});

/// Long opaque runs (API keys, client secrets, refresh tokens).
#[allow(clippy::unwrap_used)]
static OPAQUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9+/_-]{32,}={0,2}").unwrap());

/// Mask emails (first character of the local part survives) and tokens.
pub fn redact(input: &str) -> String {
    let masked = EMAIL.replace_all(input, |caps: &regex::Captures| {
        let full = &caps[0];
        match full.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                format!("{}***@{domain}", &local[..1])
            }
            _ => full.to_string(),
        }
    });
    let masked = JWT.replace_all(&masked, "[REDACTED_JWT]");
    OPAQUE.replace_all(&masked, "[REDACTED_TOKEN]").into_owned()
}

/// Display wrapper that applies [`redact`].
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
