//! Postal code value object.

use std::fmt;

/// A German postal code (PLZ): exactly five ASCII digits.
///
/// Only [`crate::utils::normalizer::normalize`] constructs values of this type,
/// so everything downstream may rely on the format. The digits are kept as a
/// string; parsing to a number would drop leading zeros (`01067`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostalCode(String);

impl PostalCode {
    pub(crate) fn from_validated(digits: String) -> Self {
        debug_assert!(digits.len() == 5 && digits.bytes().all(|b| b.is_ascii_digit()));
        Self(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PostalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
