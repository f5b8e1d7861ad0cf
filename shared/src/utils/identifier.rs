//! Account identifier helpers
//!
//! Identifiers are email addresses. They are compared case-insensitively:
//! every consumer keys on `normalize_identifier` output.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

/// Maximum accepted identifier length (RFC 5321 path limit)
pub const MAX_IDENTIFIER_LENGTH: usize = 254;

/// Trim surrounding whitespace and lowercase
pub fn normalize_identifier(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

/// Check the shape of an email address
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.len() <= MAX_IDENTIFIER_LENGTH && EMAIL_REGEX.is_match(email)
}

/// Mask an email address for logging
///
/// Keeps the first character of the local part and the whole domain:
/// `user@test.com` becomes `u***@test.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier("  User@Test.COM "), "user@test.com");
        assert_eq!(normalize_identifier("a@x.com"), "a@x.com");
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("user@test.com"));
        assert!(is_valid_email("first.last+reset@mail.example.org"));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("user"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@test.com"));
        assert!(!is_valid_email("user@test"));
        assert!(!is_valid_email("user name@test.com"));
    }

    #[test]
    fn test_rejects_overlong_email() {
        let email = format!("{}@test.com", "a".repeat(MAX_IDENTIFIER_LENGTH));
        assert!(!is_valid_email(&email));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("user@test.com"), "u***@test.com");
        assert_eq!(mask_email("a@x.com"), "a***@x.com");
        assert_eq!(mask_email("not-an-email"), "***");
        assert_eq!(mask_email("@x.com"), "***");
    }
}
