//! Postal code input normalization.

use crate::domain::entities::PostalCode;
use crate::error::LookupError;
use regex::Regex;
use std::sync::LazyLock;

/// Exactly five decimal digits, nothing else.
static PLZ_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{5}$").unwrap());

/// Upper bound on trimmed input length, checked before the regex runs so
/// oversized input is rejected cheaply and never echoed into logs.
pub const MAX_INPUT_LEN: usize = 64;

/// Validates a raw postal code string and turns it into a [`PostalCode`].
///
/// Surrounding whitespace is trimmed; nothing else is changed. Leading zeros
/// are kept.
///
/// # Errors
///
/// Returns [`LookupError::InvalidInput`] if the trimmed input is empty,
/// longer than [`MAX_INPUT_LEN`] bytes, or not exactly five digits.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize(" 01067 ").unwrap().as_str(), "01067");
/// assert!(normalize("1067").is_err());
/// assert!(normalize("64283a").is_err());
/// ```
pub fn normalize(raw: &str) -> Result<PostalCode, LookupError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(LookupError::invalid_input("Bitte eine PLZ angeben."));
    }

    if trimmed.len() > MAX_INPUT_LEN {
        return Err(LookupError::invalid_input(
            "Eingabe zu lang. Erwartet: 5 Ziffern.",
        ));
    }

    if !PLZ_REGEX.is_match(trimmed) {
        return Err(LookupError::invalid_input(
            "Ungültige PLZ. Erwartet: 5 Ziffern.",
        ));
    }

    Ok(PostalCode::from_validated(trimmed.to_string()))
}
