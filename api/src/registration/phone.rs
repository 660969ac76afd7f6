use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{event, Level};

/// Only ASCII digits count. Other Unicode digits are stripped like any other character.
static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").expect("valid regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhoneError {
    #[error("unrecognized phone number format: {0}")]
    UnrecognizedFormat(String),

    #[error("phone number is invalid after normalization: {0}")]
    InvalidAfterNormalization(String),
}

/// Normalize a Kazakhstan phone number to `+7XXXXXXXXXX`.
///
/// Accepts `8XXXXXXXXXX`, `7XXXXXXXXXX`, and the ten digit `7XXXXXXXXX` form where the
/// leading country digit was left off. Everything that is not a digit is ignored.
pub fn normalize_phone(input: &str) -> Result<String, PhoneError> {
    let digits = NON_DIGIT.replace_all(input, "");

    let first = digits.as_bytes().first().copied();

    let digits = match (digits.len(), first) {
        (11, Some(b'8')) => format!("7{}", &digits[1..]),
        (10, Some(b'7')) => format!("7{digits}"),
        (11, Some(b'7')) => digits.into_owned(),
        _ => return Err(PhoneError::UnrecognizedFormat(input.to_string())),
    };

    if digits.len() != 11 || !digits.starts_with('7') {
        return Err(PhoneError::InvalidAfterNormalization(digits));
    }

    Ok(format!("+{digits}"))
}

/// Normalize `input`, or hand it back untouched if it can't be normalized.
pub fn normalize_phone_or_raw(input: &str) -> String {
    match normalize_phone(input) {
        Ok(phone) => phone,
        Err(e) => {
            event!(Level::WARN, error = %e, "phone number normalization failed, keeping raw value");
            input.to_string()
        }
    }
}
