use once_cell::sync::Lazy;
use regex::Regex;

use crate::{ReportsError, ReportsResult};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// One `@`, no whitespace, and a dot somewhere in the domain part.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn require_email(email: &str) -> ReportsResult<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ReportsError::InvalidEmail(email.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for email in [
            "yamada@example.com",
            "test@example.co.jp",
            "user+tag@example.com",
        ] {
            assert!(is_valid_email(email), "{email} should validate");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "invalid-email",
            "no-domain@",
            "@example.com",
            "two@@example.com",
            "user@localhost",
            "with space@example.com",
            "",
        ] {
            assert!(!is_valid_email(email), "{email:?} should not validate");
        }
    }

    #[test]
    fn require_email_reports_the_input() {
        let err = require_email("invalid-email").unwrap_err();
        assert!(matches!(err, ReportsError::InvalidEmail(ref e) if e == "invalid-email"));
    }
}
