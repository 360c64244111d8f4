//! Name validation for hutches, aliases, and device-type collections.
//!
//! Valid names:
//! - Must be non-empty
//! - Must not contain whitespace or control characters
//! - Must not contain `$`, `/`, or `\`
//! - Must not start with `.`

use crate::error::TypeError;

/// Characters that are forbidden anywhere in a name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '$', '/', '\\'];

/// Validate a hutch, alias, or collection name, returning `Ok(())` if valid.
///
/// Names end up as storage partitions, so the character set is kept narrow
/// enough to be safe for any backend.
///
/// # Examples
///
/// ```
/// use hutchdb_types::names::validate_name;
///
/// assert!(validate_name("tmo").is_ok());
/// assert!(validate_name("BEAM").is_ok());
/// assert!(validate_name("").is_err());
/// assert!(validate_name("bad name").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<(), TypeError> {
    if name.is_empty() {
        return Err(TypeError::InvalidName {
            name: name.to_string(),
            reason: "name must not be empty".into(),
        });
    }

    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(TypeError::InvalidName {
                name: name.to_string(),
                reason: format!("contains forbidden character: {ch:?}"),
            });
        }
    }

    if name.chars().any(|c| c.is_control()) {
        return Err(TypeError::InvalidName {
            name: name.to_string(),
            reason: "contains control character".into(),
        });
    }

    if name.starts_with('.') {
        return Err(TypeError::InvalidName {
            name: name.to_string(),
            reason: "must not start with '.'".into(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_names() {
        for name in ["tmo", "rix", "TST", "cam_1", "BEAM-line2", "jungfrau"] {
            assert!(validate_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(validate_name("").is_err());
    }

    #[test]
    fn rejects_forbidden_characters() {
        for name in ["a b", "a\tb", "a$b", "a/b", "a\\b"] {
            assert!(validate_name(name).is_err(), "{name:?} should be invalid");
        }
    }

    #[test]
    fn rejects_control_characters() {
        assert!(validate_name("a\u{0}b").is_err());
    }

    #[test]
    fn rejects_leading_dot() {
        assert!(validate_name(".hidden").is_err());
        assert!(validate_name("ok.dotted").is_ok());
    }
}
