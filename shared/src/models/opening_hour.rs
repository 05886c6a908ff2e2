//! Opening Hour Model
//!
//! One row per weekday, seeded outside the application. Rows are only ever
//! updated, keyed by `day_of_week`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{ValidationError, ValidationResult};
use crate::validation::{parse_time, validate_time_range};

/// Default opening time proposed when a closed day is opened
pub const DEFAULT_OPENING_TIME: &str = "09:00";

/// Default closing time proposed when a closed day is opened
pub const DEFAULT_CLOSING_TIME: &str = "18:00";

/// Opening hours for one weekday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningHour {
    pub id: Uuid,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    pub is_open: bool,
    /// `HH:MM:SS` as stored by the backend, null when closed
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Update opening hour payload
///
/// The time fields are tri-state: `None` leaves the column alone,
/// `Some(None)` writes null, `Some(Some(t))` writes a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpeningHourUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "explicit_null"
    )]
    pub opening_time: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "explicit_null"
    )]
    pub closing_time: Option<Option<String>>,
}

/// A present-but-null field deserializes to `Some(None)`.
fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl OpeningHourUpdate {
    /// Open the day between two times
    pub fn open(opening: impl Into<String>, closing: impl Into<String>) -> Self {
        Self {
            is_open: Some(true),
            opening_time: Some(Some(opening.into())),
            closing_time: Some(Some(closing.into())),
        }
    }

    /// Open the day with the default 09:00 - 18:00 range
    pub fn open_default() -> Self {
        Self::open(DEFAULT_OPENING_TIME, DEFAULT_CLOSING_TIME)
    }

    /// Close the day; both times are nulled
    pub fn closed() -> Self {
        Self {
            is_open: Some(false),
            opening_time: Some(None),
            closing_time: Some(None),
        }
    }

    /// Validate against the row being edited, since a partial update may
    /// only carry one of the two times.
    pub fn validate_against(&self, current: Option<&OpeningHour>) -> ValidationResult {
        let is_open = self
            .is_open
            .or_else(|| current.map(|c| c.is_open))
            .unwrap_or(false);

        let opening = match &self.opening_time {
            Some(v) => v.clone(),
            None => current.and_then(|c| c.opening_time.clone()),
        };
        let closing = match &self.closing_time {
            Some(v) => v.clone(),
            None => current.and_then(|c| c.closing_time.clone()),
        };

        if let Some(t) = &opening {
            parse_time(t, "opening_time")?;
        }
        if let Some(t) = &closing {
            parse_time(t, "closing_time")?;
        }

        if is_open {
            match (opening, closing) {
                (Some(open), Some(close)) => validate_time_range(&open, &close)?,
                _ => return Err(ValidationError::MissingHours),
            }
        }
        Ok(())
    }

    pub fn apply_to(&self, hour: &mut OpeningHour) {
        if let Some(v) = self.is_open {
            hour.is_open = v;
        }
        if let Some(v) = &self.opening_time {
            hour.opening_time = v.clone();
        }
        if let Some(v) = &self.closing_time {
            hour.closing_time = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> OpeningHour {
        OpeningHour {
            id: Uuid::new_v4(),
            day_of_week: 1,
            is_open: true,
            opening_time: Some("09:00:00".into()),
            closing_time: Some("19:00:00".into()),
            updated_at: None,
        }
    }

    #[test]
    fn test_closed_serializes_explicit_nulls() {
        let json = serde_json::to_value(OpeningHourUpdate::closed()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "is_open": false, "opening_time": null, "closing_time": null })
        );
    }

    #[test]
    fn test_partial_update_serializes_only_given_fields() {
        let update = OpeningHourUpdate {
            closing_time: Some(Some("20:00".into())),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "closing_time": "20:00" }));
    }

    #[test]
    fn test_deserialize_tri_state() {
        let update: OpeningHourUpdate =
            serde_json::from_str(r#"{"opening_time": null}"#).unwrap();
        assert_eq!(update.opening_time, Some(None));
        assert_eq!(update.closing_time, None);
    }

    #[test]
    fn test_validate_against_current_row() {
        let current = monday();
        let later_close = OpeningHourUpdate {
            closing_time: Some(Some("20:00".into())),
            ..Default::default()
        };
        assert!(later_close.validate_against(Some(&current)).is_ok());

        let before_open = OpeningHourUpdate {
            closing_time: Some(Some("08:00".into())),
            ..Default::default()
        };
        assert!(matches!(
            before_open.validate_against(Some(&current)),
            Err(ValidationError::InvertedHours { .. })
        ));

        assert!(OpeningHourUpdate::closed().validate_against(Some(&current)).is_ok());

        let open_without_times = OpeningHourUpdate {
            is_open: Some(true),
            ..Default::default()
        };
        assert_eq!(
            open_without_times.validate_against(None),
            Err(ValidationError::MissingHours)
        );
    }

    #[test]
    fn test_apply_closed() {
        let mut hour = monday();
        OpeningHourUpdate::closed().apply_to(&mut hour);
        assert!(!hour.is_open);
        assert!(hour.opening_time.is_none());
        assert!(hour.closing_time.is_none());
    }
}
