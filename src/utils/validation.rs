//! Field rules shared by request DTOs.

use chrono::NaiveDate;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::ValidationError;

/// Exactly ten ASCII digits.
pub static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone regex is valid"));

/// Date format accepted for `birth_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// `validator` custom rule: the value must be a real calendar date.
pub fn validate_date(value: &str) -> Result<(), ValidationError> {
    if parse_date(value).is_some() {
        return Ok(());
    }

    Err(ValidationError::new("date")
        .with_message(Cow::Borrowed("the birth date is not a valid date (YYYY-MM-DD)")))
}

/// `validator` custom rule: the value must not be blank.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("the field must not be empty")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_REGEX.is_match("5551234567"));
        assert!(!PHONE_REGEX.is_match("555"));
        assert!(!PHONE_REGEX.is_match("555123456"));
        assert!(!PHONE_REGEX.is_match("55512345678"));
        assert!(!PHONE_REGEX.is_match("555-123-456"));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("1990-01-01"),
            NaiveDate::from_ymd_opt(1990, 1, 1)
        );
        assert!(parse_date("1990-02-30").is_none());
        assert!(parse_date("01/01/1990").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2000-02-29").is_ok());
        assert!(validate_date("2001-02-29").is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Ana").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }
}
