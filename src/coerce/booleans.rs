#![deny(missing_docs)]

//! # Boolean Literals
//!
//! The fixed, case-insensitive sets of string literals the whole engine
//! accepts as booleans. Enumerated once so every call site agrees.

/// String literals accepted as `true`.
pub const TRUE_LITERALS: [&str; 6] = ["true", "t", "yes", "y", "on", "1"];

/// String literals accepted as `false`.
pub const FALSE_LITERALS: [&str; 6] = ["false", "f", "no", "n", "off", "0"];

/// Matches a string against the literal sets, case-insensitively.
pub(crate) fn parse_literal(s: &str) -> Option<bool> {
    let lowered = s.to_ascii_lowercase();
    if TRUE_LITERALS.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSE_LITERALS.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}
