//! Personal identification formats: Chilean RUT and mobile phone numbers.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// RUT pattern: 7-8 digits, a dash, and a digit or `k`/`K` check character.
pub const RUT_PATTERN: &str = r"^\d{7,8}-[\dkK]$";

/// Chilean mobile number, optionally prefixed with `+56` and the leading `9`.
pub const PHONE_PATTERN: &str = r"^\+?56?9?\d{8}$";

/// Minimum password length for staff accounts and citizen registrations.
pub const MIN_PASSWORD_LENGTH: usize = 8;

static RUT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(RUT_PATTERN).expect("valid regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

/// Validate a RUT in `12345678-9` form.
pub fn validate_rut(rut: &str) -> Result<(), CoreError> {
    if RUT_RE.is_match(rut) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "The RUT must have the format 12345678-9".to_string(),
        ))
    }
}

/// Validate a mobile phone number such as `+56912345678`.
pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "The phone must have the format +56912345678".to_string(),
        ))
    }
}

/// Check that a required text field is present and not blank.
pub fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::missing_field(field));
    }
    Ok(())
}

/// `"first last"`, the name shown in sessions and greetings.
pub fn display_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_ruts() {
        assert!(validate_rut("12345678-9").is_ok());
        assert!(validate_rut("1234567-K").is_ok());
        assert!(validate_rut("7654321-k").is_ok());
    }

    #[test]
    fn rejects_malformed_ruts() {
        assert!(validate_rut("123456789").is_err());
        assert!(validate_rut("12.345.678-9").is_err());
        assert!(validate_rut("123456-9").is_err());
        assert!(validate_rut("12345678-X").is_err());
    }

    #[test]
    fn phone_formats() {
        assert!(validate_phone("+56912345678").is_ok());
        assert!(validate_phone("912345678").is_ok());
        assert!(validate_phone("12345678").is_ok());
        assert!(validate_phone("+1 555 0100").is_err());
        assert!(validate_phone("abc").is_err());
    }

    #[test]
    fn require_rejects_blank() {
        assert!(require("email", "  ").is_err());
        assert!(require("email", "a@b.cl").is_ok());
    }

    #[test]
    fn display_name_joins_parts() {
        assert_eq!(display_name("Ana", "Rojas"), "Ana Rojas");
    }
}
