//! Contact Info Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationResult;
use crate::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
};

/// Contact details (singleton: at most one row is read)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub id: Uuid,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Update contact info payload, also used to create the row on first save
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfoUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ContactInfoUpdate {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none() && self.address.is_none()
    }

    pub fn validate(&self) -> ValidationResult {
        validate_optional_text(self.phone.as_deref(), "phone", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(self.email.as_deref(), "email", MAX_EMAIL_LEN)?;
        validate_optional_text(self.address.as_deref(), "address", MAX_ADDRESS_LEN)
    }

    pub fn apply_to(&self, info: &mut ContactInfo) {
        if let Some(v) = &self.phone {
            info.phone = v.clone();
        }
        if let Some(v) = &self.email {
            info.email = v.clone();
        }
        if let Some(v) = &self.address {
            info.address = v.clone();
        }
    }
}
