//! Validation rules for reference data fields.

/// Checks a SWIFT/BIC code: 4 letters (institution), 2 letters (country),
/// 2 alphanumerics (location), optional 3 alphanumerics (branch).
///
/// Only uppercase codes are accepted; the downstream switch parses the
/// code positionally and is case-sensitive.
#[must_use]
pub fn is_valid_swift_code(code: &str) -> bool {
    let len = code.len();
    if len != 8 && len != 11 {
        return false;
    }
    code.chars().enumerate().all(|(i, c)| match i {
        0..=5 => c.is_ascii_uppercase(),
        _ => c.is_ascii_uppercase() || c.is_ascii_digit(),
    })
}

/// Checks an ISO 4217 currency code: exactly three uppercase ASCII letters.
#[must_use]
pub fn is_valid_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}
