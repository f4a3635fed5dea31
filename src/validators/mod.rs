//! Field-level checks applied to inbound users.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("Failed to compile email regex")
});

/// Returns true when `candidate` looks like `local@domain.tld`.
///
/// The domain must contain at least one dot and nothing may contain
/// whitespace. Anything malformed is simply `false`.
pub fn is_email_valid(candidate: &str) -> bool {
    if candidate.len() > 254 {
        return false;
    }
    EMAIL_PATTERN.is_match(candidate)
}
