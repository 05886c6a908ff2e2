//! Service Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationResult;
use crate::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_choice, validate_optional_text, validate_price,
    validate_required_text, validate_text,
};

/// Categories offered by the admin form
pub const SERVICE_CATEGORIES: &[&str] = &["coupe", "coloration", "soins", "evenement", "general"];

pub const DEFAULT_SERVICE_CATEGORY: &str = "general";

/// Symbolic icon name used when none is chosen
pub const DEFAULT_SERVICE_ICON: &str = "Scissors";

/// Service entity (one priced prestation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Starting price, never negative
    #[serde(with = "rust_decimal::serde::float")]
    pub price_from: Decimal,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_category")]
    pub category: String,
    /// Only active services appear on the public page
    pub is_active: bool,
    /// Display order, ascending
    #[serde(default)]
    pub order_index: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_icon() -> String {
    DEFAULT_SERVICE_ICON.to_string()
}

fn default_category() -> String {
    DEFAULT_SERVICE_CATEGORY.to_string()
}

/// Create service payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCreate {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_from: Decimal,
    pub icon: String,
    pub category: String,
    pub is_active: bool,
    pub order_index: i32,
}

impl ServiceCreate {
    /// New active service with the admin form's defaults
    pub fn new(name: impl Into<String>, price_from: Decimal) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            price_from,
            icon: default_icon(),
            category: default_category(),
            is_active: true,
            order_index: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_order_index(mut self, order_index: i32) -> Self {
        self.order_index = order_index;
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn validate(&self) -> ValidationResult {
        validate_required_text(&self.name, "name", MAX_NAME_LEN)?;
        validate_text(&self.description, "description", MAX_NOTE_LEN)?;
        validate_text(&self.icon, "icon", MAX_NAME_LEN)?;
        validate_choice(&self.category, "category", SERVICE_CATEGORIES)?;
        validate_price(self.price_from, "price_from")
    }
}

/// Update service payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price_from: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
}

impl ServiceUpdate {
    pub fn validate(&self) -> ValidationResult {
        if let Some(name) = &self.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        validate_optional_text(self.description.as_deref(), "description", MAX_NOTE_LEN)?;
        validate_optional_text(self.icon.as_deref(), "icon", MAX_NAME_LEN)?;
        if let Some(category) = &self.category {
            validate_choice(category, "category", SERVICE_CATEGORIES)?;
        }
        if let Some(price) = self.price_from {
            validate_price(price, "price_from")?;
        }
        Ok(())
    }

    /// Apply onto an existing row, the way the backend merges a PATCH.
    pub fn apply_to(&self, service: &mut Service) {
        if let Some(v) = &self.name {
            service.name = v.clone();
        }
        if let Some(v) = &self.description {
            service.description = v.clone();
        }
        if let Some(v) = self.price_from {
            service.price_from = v;
        }
        if let Some(v) = &self.icon {
            service.icon = v.clone();
        }
        if let Some(v) = &self.category {
            service.category = v.clone();
        }
        if let Some(v) = self.is_active {
            service.is_active = v;
        }
        if let Some(v) = self.order_index {
            service.order_index = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_deserializes_numeric_price() {
        let json = r#"{
            "id": "6f1c1d2e-3a4b-4c5d-8e9f-0a1b2c3d4e5f",
            "name": "Coupe Homme",
            "description": "Shampoing, coupe, coiffage",
            "price_from": 25.5,
            "icon": "Scissors",
            "category": "coupe",
            "is_active": true,
            "order_index": 1,
            "created_at": "2025-01-10T09:00:00Z",
            "updated_at": null
        }"#;
        let service: Service = serde_json::from_str(json).unwrap();
        assert_eq!(service.price_from, Decimal::new(255, 1));
        assert_eq!(service.category, "coupe");
        assert!(service.updated_at.is_none());
    }

    #[test]
    fn test_update_skips_untouched_fields() {
        let update = ServiceUpdate {
            is_active: Some(false),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "is_active": false }));
    }

    #[test]
    fn test_create_validation() {
        assert!(ServiceCreate::new("Coupe Homme", Decimal::new(25, 0)).validate().is_ok());
        assert!(ServiceCreate::new("", Decimal::new(25, 0)).validate().is_err());
        assert!(ServiceCreate::new("Brushing", Decimal::new(-5, 0)).validate().is_err());
    }

    #[test]
    fn test_category_must_be_offered() {
        for category in SERVICE_CATEGORIES {
            let create = ServiceCreate::new("Coupe", Decimal::new(20, 0)).with_category(*category);
            assert!(create.validate().is_ok(), "{category}");
        }

        let err = ServiceCreate::new("Coupe", Decimal::new(20, 0))
            .with_category("bogus")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::ValidationError::UnknownChoice { field: "category", .. }
        ));

        let update = ServiceUpdate {
            category: Some("bogus".into()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
        assert!(ServiceUpdate::default().validate().is_ok());
    }
}
