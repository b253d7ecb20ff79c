//! Input syntax checks for display names, book titles and email addresses.

use crate::{Result, ShelfError};
use once_cell::sync::Lazy;
use regex::Regex;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9 ]+$").expect("name pattern is a valid regex"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@[A-Za-z0-9_-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Accepts ASCII letters, digits and spaces only; `field` names the input in
/// the error message ("Username", "Book title", ...).
pub fn validate_name(input: &str, field: &str) -> Result<()> {
    if NAME_PATTERN.is_match(input) {
        Ok(())
    } else {
        Err(ShelfError::InvalidInput(format!(
            "{} contains invalid characters",
            field
        )))
    }
}

pub fn validate_email(email: &str) -> Result<()> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(ShelfError::InvalidInput(format!(
            "invalid email format: '{}'",
            email
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_name("alice", "Username").is_ok());
        assert!(validate_name("Go Deep 2", "Book title").is_ok());
    }

    #[test]
    fn test_invalid_names() {
        for input in ["", "bob!", "o'neil", "tab\there", "naïve"] {
            let err = validate_name(input, "Username").unwrap_err();
            assert!(matches!(err, ShelfError::InvalidInput(_)), "{input:?}");
        }
    }

    #[test]
    fn test_error_names_the_field() {
        let err = validate_name("bad#title", "Book title").unwrap_err();
        assert!(err.to_string().contains("Book title"));
    }

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("alice@x.com").is_ok());
        assert!(validate_email("first.last-2@mail-host.org").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["", "alice", "alice@x", "alice@x.c", "@x.com", "a b@x.com", "a@b.c.d1"] {
            assert!(validate_email(email).is_err(), "{email:?} should be rejected");
        }
    }
}
