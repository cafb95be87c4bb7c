//! Input canonicalization.

use crate::error::{Error, InvalidReason, Result};

/// Label separator.
pub const DOT: char = '.';

/// Scheme delimiter, signals a URL was passed instead of a host.
const SCHEME_DELIMITER: &str = "://";

/// Normalize a raw domain name.
///
/// Trims surrounding whitespace, drops one trailing dot and lowercases
/// ASCII letters. Fails if the result is blank, starts with a dot, still
/// ends with a dot, has an empty label anywhere else, or contains a scheme
/// delimiter.
///
/// # Examples
/// ```
/// assert_eq!(pubsuffix::normalize(" WWW.Example.COM. ").unwrap(), "www.example.com");
/// assert!(pubsuffix::normalize("http://example.com").is_err());
/// ```
pub fn normalize(name: &str) -> Result<String> {
    let trimmed = name.trim();
    let trimmed = trimmed.strip_suffix(DOT).unwrap_or(trimmed).trim_end();
    let normalized = trimmed.to_ascii_lowercase();

    if normalized.is_empty() {
        return Err(Error::invalid(name, InvalidReason::Blank));
    }
    if normalized.starts_with(DOT) {
        return Err(Error::invalid(name, InvalidReason::LeadingSeparator));
    }
    // A second trailing dot is an empty label, not the root.
    if normalized.ends_with(DOT) {
        return Err(Error::invalid(name, InvalidReason::TrailingSeparator));
    }
    if normalized.contains("..") {
        return Err(Error::invalid(name, InvalidReason::EmptyLabel));
    }
    if normalized.contains(SCHEME_DELIMITER) {
        return Err(Error::invalid(name, InvalidReason::SchemeLike));
    }

    Ok(normalized)
}

/// Split a normalized name into labels, leftmost first.
pub(crate) fn labels(name: &str) -> Vec<&str> {
    name.split(DOT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(name: &str) -> Option<InvalidReason> {
        normalize(name).err().and_then(|e| e.invalid_reason())
    }

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("example.com").unwrap(), "example.com");
        assert_eq!(normalize("Example.COM").unwrap(), "example.com");
        assert_eq!(normalize("  www.example.com\t\n").unwrap(), "www.example.com");
    }

    #[test]
    fn test_trailing_dot() {
        assert_eq!(normalize("example.com.").unwrap(), "example.com");
        assert_eq!(normalize("example.com. ").unwrap(), "example.com");
        assert_eq!(normalize("example.com .").unwrap(), "example.com");
        // Only one trailing dot is dropped
        assert_eq!(reason("example.com.."), Some(InvalidReason::TrailingSeparator));
        assert_eq!(reason("example. ."), Some(InvalidReason::TrailingSeparator));
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(reason(""), Some(InvalidReason::Blank));
        assert_eq!(reason("   "), Some(InvalidReason::Blank));
        assert_eq!(reason("."), Some(InvalidReason::Blank));
        assert_eq!(reason(".example.com"), Some(InvalidReason::LeadingSeparator));
        assert_eq!(reason("http://example.com"), Some(InvalidReason::SchemeLike));
        assert_eq!(reason("HTTPS://Example.com/"), Some(InvalidReason::SchemeLike));
    }

    #[test]
    fn test_empty_inner_label() {
        assert_eq!(reason("a..com"), Some(InvalidReason::EmptyLabel));
        assert_eq!(reason("www..ck"), Some(InvalidReason::EmptyLabel));
        assert_eq!(reason("a.b...c.com."), Some(InvalidReason::EmptyLabel));
    }

    #[test]
    fn test_ascii_only_case_fold() {
        assert_eq!(normalize("ÄBC.Example.com").unwrap(), "Äbc.example.com");
    }

    #[test]
    fn test_idempotent() {
        for input in ["Example.COM.", " a.b.c ", "a .", "x", "UPPER.Case.Org"] {
            let once = normalize(input).unwrap();
            assert_eq!(normalize(&once).unwrap(), once);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(labels("www.example.com"), vec!["www", "example", "com"]);
        assert_eq!(labels("com"), vec!["com"]);
    }
}
