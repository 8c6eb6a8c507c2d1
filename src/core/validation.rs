//! Input validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::errors::ClinicError;

/// Trimmed value, or `None` when absent or blank.
pub fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// RFC 5321 caps a forward path at 254 octets.
const MAX_EMAIL_LEN: usize = 254;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$").expect("email pattern is valid"));

/// A single `local@domain.tld` address with no whitespace.
pub fn validate_email(email: &str) -> Result<(), ClinicError> {
    if email.len() > MAX_EMAIL_LEN || !EMAIL_PATTERN.is_match(email) {
        return Err(ClinicError::validation("Invalid email format"));
    }
    Ok(())
}
