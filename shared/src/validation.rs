//! Input shape checks shared by the public and privileged endpoints

use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email regex"));

/// Standard email shape: `local@domain.tld`, no whitespace, exactly one `@`
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// Trimmed value, or `None` when absent or blank
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
