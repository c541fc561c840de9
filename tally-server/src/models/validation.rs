//! Validation error types and presence checks

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field absent or blank
    Missing { field: &'static str },

    /// Value present but unusable (bad date, bad UUID, bad base64)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Request body or query string could not be parsed
    Malformed { reason: String },

    /// Update request carried no fields
    NoChanges { resource: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::Malformed { reason } => write!(f, "malformed request: {}", reason),
            Self::NoChanges { resource } => {
                write!(f, "no fields supplied to update {}", resource)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Require a value to be present.
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Missing { field })
}

/// Require a text value to be present and not blank.
///
/// The value is returned untrimmed; only the presence check ignores whitespace.
pub fn required_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ValidationError::Missing { field }),
    }
}
