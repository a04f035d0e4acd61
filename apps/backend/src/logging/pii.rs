//! PII masking for values that end up in logs (mostly raw DB error text).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::unwrap_used)]
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@([A-Za-z0-9.-]+\.[A-Za-z]{1,})\b").unwrap());

// three base64url segments: a JWT
#[allow(clippy::unwrap_used)]
static JWT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\b").unwrap()
});

// PHC strings as produced by argon2
#[allow(clippy::unwrap_used)]
static PHC_HASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$argon2(id|i|d)\$[A-Za-z0-9=,$/+.-]+").unwrap());

/// Mask emails (keep first char and domain), JWTs and password hashes.
pub fn redact(input: &str) -> String {
    let out = PHC_HASH.replace_all(input, "[REDACTED_HASH]");
    let out = JWT.replace_all(&out, "[REDACTED_TOKEN]");
    EMAIL
        .replace_all(&out, |caps: &regex::Captures| {
            let full = &caps[0];
            let first = full.chars().next().unwrap_or('*');
            format!("{first}***@{}", &caps[1])
        })
        .into_owned()
}

/// Display wrapper that redacts on format, for use in tracing fields.
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
