//! Site Content Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationResult;
use crate::validation::{MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_required_text, validate_text};

/// Conflict target used by the upsert, unique per row
pub const SITE_CONTENT_CONFLICT_TARGET: &str = "section,key";

/// Value type written by the content editor
pub const CONTENT_TYPE_TEXT: &str = "text";

/// One editable piece of page copy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub id: Uuid,
    pub section: String,
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "type", default = "default_type")]
    pub content_type: String,
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_type() -> String {
    CONTENT_TYPE_TEXT.to_string()
}

/// Upsert payload keyed on (section, key)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContentUpsert {
    pub section: String,
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

impl SiteContentUpsert {
    pub fn text(
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
            value: value.into(),
            content_type: default_type(),
        }
    }

    pub fn validate(&self) -> ValidationResult {
        validate_required_text(&self.section, "section", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&self.key, "key", MAX_SHORT_TEXT_LEN)?;
        validate_text(&self.value, "value", MAX_NOTE_LEN)
    }
}
