//! Frozen safety policy: size bounds, the character whitelist, and the
//! suspicious-substring denylist.
//!
//! Everything in this module is compile-time constant. There is no runtime
//! registration or mutation surface, so concurrent evaluations share nothing
//! mutable.
//!
//! [`validate`] is a coarse pre-filter that runs before any parsing. It is
//! not the safety boundary on its own; the grammar in [`crate::eval`] accepts
//! only numeric/operator syntax regardless of what the denylist catches.

use crate::error::ValidationError;

/// Maximum accepted expression length, in bytes.
pub const MAX_LENGTH: usize = 500;

/// Maximum recursion depth for the grammar rules.
///
/// Counted per active rule invocation, so one parenthesis level costs several
/// units of depth. 100 still allows nesting far beyond anything a human
/// writes by hand.
pub const MAX_DEPTH: usize = 100;

/// The binary/unary operator characters the grammar understands.
pub const OPERATORS: [char; 6] = ['+', '-', '*', '/', '%', '^'];

/// Substrings rejected outright, scanned case-insensitively.
///
/// These are the host-language escape vocabulary of the usual injection
/// attempts (interpreter entry points, reflection, control-flow keywords,
/// dunder/sigil prefixes). The list is pattern matching on English words, not
/// a security boundary; the grammar-level whitelist is what actually confines
/// the input.
pub const DENYLIST: [&str; 15] = [
    "exec", "eval", "runtime", "process", "system", "class", "reflect", "invoke", "script",
    "import", "while", "for", "if", "__", "$$",
];

/// Whether `ch` belongs to the whitelist character class: ASCII digits,
/// `.`, the operator characters, parentheses, ASCII letters (for
/// identifiers), and ASCII whitespace. Everything non-ASCII is rejected.
pub fn is_allowed_char(ch: char) -> bool {
    ch.is_ascii_digit()
        || ch.is_ascii_alphabetic()
        || ch.is_ascii_whitespace()
        || ch == '.'
        || ch == '('
        || ch == ')'
        || OPERATORS.contains(&ch)
}

/// Case-insensitive substring search without allocating a lowered copy.
fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

/// Validate raw input against the safety policy.
///
/// Checks run in order: length bound, character-class whitelist, denylist
/// scan. The first violation is returned; nothing is parsed here. Pure
/// predicate with no side effects.
pub fn validate(raw: &str) -> Result<(), ValidationError> {
    if raw.len() > MAX_LENGTH {
        return Err(ValidationError::TooLong { len: raw.len(), max: MAX_LENGTH });
    }

    if let Some((position, ch)) = raw.char_indices().find(|(_, c)| !is_allowed_char(*c)) {
        return Err(ValidationError::IllegalCharacter { ch, position });
    }

    for pattern in DENYLIST {
        if contains_ignore_ascii_case(raw, pattern) {
            return Err(ValidationError::SuspiciousPattern { pattern });
        }
    }

    Ok(())
}
