//! Validation error types

use std::fmt;

/// Validation error for request payloads and domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty or missing when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Numeric field outside its allowed range
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// String doesn't match required format
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Invalid enum variant
    InvalidVariant { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::OutOfRange { field, min, max } => {
                write!(f, "{} must be between {} and {}", field, min, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::OutOfRange {
            field: "rating",
            min: 1,
            max: 5,
        };
        assert_eq!(err.to_string(), "rating must be between 1 and 5");

        let err = ValidationError::Empty { field: "property_id" };
        assert_eq!(err.to_string(), "property_id cannot be empty");
    }
}
