//! Syntactic check for participant contact addresses.

use std::sync::LazyLock;

use regex::Regex;

/// Local part without whitespace or `@`, a hostname label, then at least one
/// dotted label.
static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[a-zA-Z0-9\-]+(\.[a-zA-Z0-9]+)+$").expect("address regex is valid")
});

/// True if `email` looks like a deliverable address.
///
/// This is a shape check only; it does not resolve the domain.
pub fn is_valid_address(email: &str) -> bool {
    ADDRESS_RE.is_match(email)
}
