//! Generators for unique fixture values.
//!
//! Fixtures must not collide when several tests share one database
//! (the Postgres test profile), so every generated value embeds a ULID.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("game");
/// let b = unique_str("game");
/// assert_ne!(a, b);
/// assert!(a.starts_with("game-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// `{prefix}-{ulid}@example.test`, lowercased the way registration stores it.
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new()).to_lowercase()
}

/// Username made of letters, digits and underscores only.
///
/// ```
/// use backend_test_support::unique_helpers::unique_username;
///
/// let name = unique_username("player");
/// assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
/// ```
pub fn unique_username(prefix: &str) -> String {
    let cleaned: String = prefix
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    format!("{}_{}", cleaned, Ulid::new())
}
