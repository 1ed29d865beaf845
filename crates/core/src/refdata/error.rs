//! Reference data error types.

use thiserror::Error;

/// Errors raised while constructing or validating reference data.
#[derive(Debug, Error)]
pub enum RefDataError {
    /// SWIFT/BIC code does not match the expected format.
    #[error("Invalid SWIFT code: {0}")]
    InvalidSwiftCode(String),

    /// Currency code is not three uppercase ASCII letters.
    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    /// A mandatory field was left empty.
    #[error("{field} must not be empty")]
    EmptyField {
        /// The offending field name.
        field: &'static str,
    },
}

impl RefDataError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        400
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSwiftCode(_) => "INVALID_SWIFT_CODE",
            Self::InvalidCurrencyCode(_) => "INVALID_CURRENCY_CODE",
            Self::EmptyField { .. } => "EMPTY_FIELD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            RefDataError::InvalidSwiftCode("XX".into()).error_code(),
            "INVALID_SWIFT_CODE"
        );
        assert_eq!(
            RefDataError::InvalidCurrencyCode("mwk".into()).error_code(),
            "INVALID_CURRENCY_CODE"
        );
        assert_eq!(
            RefDataError::EmptyField { field: "name" }.error_code(),
            "EMPTY_FIELD"
        );
    }

    #[test]
    fn test_error_display() {
        let err = RefDataError::InvalidSwiftCode("BADCODE".into());
        assert!(err.to_string().contains("BADCODE"));
        assert_eq!(err.status_code(), 400);
    }
}
