//! Input validation helpers
//!
//! Centralized text length limits and the checks applied by every store
//! before a write reaches the backend.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::error::{ValidationError, ValidationResult};

// ── Text length limits ──────────────────────────────────────────────

/// Service names, image titles, icon names, categories
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions and page copy
pub const MAX_NOTE_LEN: usize = 2000;

/// Short identifiers: phone numbers, content keys
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Public URLs of stored images
pub const MAX_URL_LEN: usize = 2048;

/// Postal addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Upload limits ───────────────────────────────────────────────────

/// Maximum image size (5MB)
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Accepted image extensions
pub const SUPPORTED_IMAGE_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

// ── Helpers ─────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &'static str, max: usize) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    validate_text(value, field, max)
}

/// Validate that a string is within the length limit (empty allowed).
pub fn validate_text(value: &str, field: &'static str, max: usize) -> ValidationResult {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, len, max });
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &'static str,
    max: usize,
) -> ValidationResult {
    match value {
        Some(v) => validate_text(v, field, max),
        None => Ok(()),
    }
}

/// Validate that a value is one of `allowed`.
pub fn validate_choice(value: &str, field: &'static str, allowed: &[&str]) -> ValidationResult {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(ValidationError::UnknownChoice {
        field,
        value: value.to_string(),
        allowed: allowed.join(", "),
    })
}

pub fn validate_price(value: Decimal, field: &'static str) -> ValidationResult {
    if value < Decimal::ZERO {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}

pub fn validate_day_of_week(day: u8) -> ValidationResult {
    if day > 6 {
        return Err(ValidationError::DayOutOfRange(day));
    }
    Ok(())
}

/// Parse `HH:MM` or `HH:MM:SS`, the two shapes the backend stores.
pub fn parse_time(value: &str, field: &'static str) -> ValidationResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| ValidationError::InvalidTime {
            field,
            value: value.to_string(),
        })
}

/// Both times must parse and the day must open before it closes.
pub fn validate_time_range(opening: &str, closing: &str) -> ValidationResult {
    let open = parse_time(opening, "opening_time")?;
    let close = parse_time(closing, "closing_time")?;
    if open >= close {
        return Err(ValidationError::InvertedHours {
            opening: opening.to_string(),
            closing: closing.to_string(),
        });
    }
    Ok(())
}

/// Check an upload against the accepted formats and size.
///
/// Returns the lowercased extension taken from `file_name`.
pub fn validate_image_upload(file_name: &str, size: usize) -> ValidationResult<String> {
    if size > MAX_IMAGE_SIZE {
        return Err(ValidationError::FileTooLarge {
            size,
            max: MAX_IMAGE_SIZE,
        });
    }

    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if !SUPPORTED_IMAGE_FORMATS.contains(&ext.as_str()) {
        return Err(ValidationError::UnsupportedFormat {
            ext,
            supported: SUPPORTED_IMAGE_FORMATS.join(", "),
        });
    }
    Ok(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Coupe Homme", "name", MAX_NAME_LEN).is_ok());
        assert_eq!(
            validate_required_text("   ", "name", MAX_NAME_LEN),
            Err(ValidationError::Empty { field: "name" })
        );
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            validate_required_text(&long, "name", MAX_NAME_LEN),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(None, "email", MAX_EMAIL_LEN).is_ok());
        assert!(validate_optional_text(Some(""), "email", MAX_EMAIL_LEN).is_ok());
    }

    #[test]
    fn test_choice() {
        assert!(validate_choice("b", "kind", &["a", "b"]).is_ok());
        assert_eq!(
            validate_choice("z", "kind", &["a", "b"]),
            Err(ValidationError::UnknownChoice {
                field: "kind",
                value: "z".into(),
                allowed: "a, b".into(),
            })
        );
        // choices are exact
        assert!(validate_choice("A", "kind", &["a", "b"]).is_err());
    }

    #[test]
    fn test_price() {
        assert!(validate_price(Decimal::new(25, 0), "price_from").is_ok());
        assert!(validate_price(Decimal::ZERO, "price_from").is_ok());
        assert_eq!(
            validate_price(Decimal::new(-1, 0), "price_from"),
            Err(ValidationError::Negative { field: "price_from" })
        );
    }

    #[test]
    fn test_day_of_week() {
        for day in 0..=6 {
            assert!(validate_day_of_week(day).is_ok());
        }
        assert_eq!(validate_day_of_week(7), Err(ValidationError::DayOutOfRange(7)));
    }

    #[test]
    fn test_time_range() {
        assert!(validate_time_range("09:00", "18:00").is_ok());
        assert!(validate_time_range("09:00:00", "18:30:00").is_ok());
        assert!(matches!(
            validate_time_range("18:00", "09:00"),
            Err(ValidationError::InvertedHours { .. })
        ));
        assert!(matches!(
            validate_time_range("9h", "18:00"),
            Err(ValidationError::InvalidTime { field: "opening_time", .. })
        ));
    }

    #[test]
    fn test_image_upload() {
        assert_eq!(validate_image_upload("salon.JPG", 1024).unwrap(), "jpg");
        assert!(matches!(
            validate_image_upload("notes.txt", 10),
            Err(ValidationError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            validate_image_upload("noext", 10),
            Err(ValidationError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            validate_image_upload("big.png", MAX_IMAGE_SIZE + 1),
            Err(ValidationError::FileTooLarge { .. })
        ));
    }
}
