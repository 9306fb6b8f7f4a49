//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// String doesn't match required format (e.g., hex id, YYYY year)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Value parses but has no calendar representation
    OutOfRange { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::OutOfRange { field, value } => {
                write!(f, "{} out of range: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
