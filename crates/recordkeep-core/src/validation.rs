//! Input validation: format predicates applied to form input.
//!
//! These are pure functions over strings. They never touch a store.
//!
//! The format patterns accept one trailing newline after the match.

use std::sync::OnceLock;

use regex::Regex;

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\(?[0-9]{3}\)?[-. ]?[0-9]{3}[-. ]?[0-9]{4}\n?$")
            .expect("phone pattern compiles")
    })
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^([a-z0-9+_\-]+)(\.[a-z0-9+_\-]+)*@([a-z0-9\-]+\.)+[a-z]{2,6}\n?$")
            .expect("email pattern compiles")
    })
}

/// North American phone number: `604-555-1234`, `(604) 555 1234`, `6045551234`.
pub fn validate_phone(input: &str) -> bool {
    phone_pattern().is_match(input)
}

/// Email address with a 2-6 letter top-level domain. Case-insensitive.
pub fn validate_email(input: &str) -> bool {
    email_pattern().is_match(input)
}

/// A name is valid when it is not blank.
///
/// Blank means empty after stripping ASCII spaces, tabs, line breaks,
/// vertical tabs and NULs. Other Unicode whitespace counts as content.
pub fn validate_name(input: &str) -> bool {
    !input
        .trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
        .is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone() {
        assert!(validate_phone("604-555-1234"));
        assert!(validate_phone("(604) 555-1234"));
        assert!(validate_phone("604.555.1234"));
        assert!(validate_phone("6045551234"));

        assert!(validate_phone("604-555-1234\n"));

        assert!(!validate_phone("604-555-1234\n\n"));
        assert!(!validate_phone("604-555-1234 "));
        assert!(!validate_phone("555-1234"));
        assert!(!validate_phone("604-555-12345"));
        assert!(!validate_phone("abc-def-ghij"));
    }

    #[test]
    fn test_email() {
        assert!(validate_email("coach@jaguars.com"));
        assert!(validate_email("First.Last+team@mail.example.ca"));

        assert!(validate_email("coach@jaguars.com\n"));

        assert!(!validate_email("coach@jaguars.com\r\n"));
        assert!(!validate_email("coach@jaguars"));
        assert!(!validate_email("@jaguars.com"));
        assert!(!validate_email("coach jaguars.com"));
    }

    #[test]
    fn test_name() {
        assert!(validate_name("Blake"));
        assert!(validate_name("  Blake "));
        assert!(!validate_name(""));
        assert!(!validate_name("   \t"));
        assert!(!validate_name("\0\x0B\r\n"));
        assert!(validate_name("\u{00A0}"));
        assert!(validate_name("\u{3000}"));
    }
}
