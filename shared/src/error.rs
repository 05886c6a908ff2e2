//! Error types for the shared crate
//!
//! Only validation lives here: the models never perform I/O, so the one
//! thing they can reject is malformed input at the mutator boundary.

use thiserror::Error;

/// Input rejected before any request is issued
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is empty or whitespace
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    /// A text field exceeds its length limit
    #[error("{field} is too long ({len} chars, max {max})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// A price below zero
    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    /// A value outside the fixed set of choices for the field
    #[error("unknown {field} '{value}', expected one of: {allowed}")]
    UnknownChoice {
        field: &'static str,
        value: String,
        allowed: String,
    },

    /// Day of week outside 0 (Sunday) ..= 6 (Saturday)
    #[error("day_of_week must be between 0 and 6, got {0}")]
    DayOutOfRange(u8),

    /// Time not in HH:MM or HH:MM:SS form
    #[error("{field} is not a valid time: '{value}'")]
    InvalidTime { field: &'static str, value: String },

    /// Opening time not strictly before closing time
    #[error("opening time {opening} must be before closing time {closing}")]
    InvertedHours { opening: String, closing: String },

    /// An open day without both times
    #[error("an open day needs both an opening and a closing time")]
    MissingHours,

    /// Upload with an extension outside the accepted image formats
    #[error("unsupported file format '{ext}', supported: {supported}")]
    UnsupportedFormat { ext: String, supported: String },

    /// Upload larger than the accepted size
    #[error("file too large ({size} bytes, max {max} bytes)")]
    FileTooLarge { size: usize, max: usize },
}

/// Result type for validation
pub type ValidationResult<T = ()> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_human_readable() {
        let err = ValidationError::TooLong {
            field: "name",
            len: 300,
            max: 200,
        };
        assert_eq!(err.to_string(), "name is too long (300 chars, max 200)");

        let err = ValidationError::DayOutOfRange(9);
        assert_eq!(err.to_string(), "day_of_week must be between 0 and 6, got 9");
    }
}
