// src/domain/sign_up.rs
use regex::Regex;
use std::sync::OnceLock;
use super::core::InvalidFields;

pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

pub const MIN_PASSWORD_LENGTH: usize = 6;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

pub fn is_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Validates every field; each failing one is flagged.
pub fn validate_sign_up(email: &str, password: &str, username: &str) -> Result<(), InvalidFields> {
    let invalid = InvalidFields {
        email: !is_email(email),
        password: password.chars().count() < MIN_PASSWORD_LENGTH,
        username: username.trim().is_empty(),
    };

    if invalid.any() {
        Err(invalid)
    } else {
        Ok(())
    }
}
