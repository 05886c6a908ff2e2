//! Gallery Image Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationResult;
use crate::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_choice, validate_optional_text,
    validate_required_text, validate_text,
};

/// Categories offered by the gallery form
pub const GALLERY_CATEGORIES: &[&str] = &["salon", "before_after", "styling", "team"];

pub const DEFAULT_GALLERY_CATEGORY: &str = "salon";

/// Gallery image entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Public URL, resolved once the file upload completed
    pub image_url: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub order_index: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_category() -> String {
    DEFAULT_GALLERY_CATEGORY.to_string()
}

/// What the admin fills in before the file is uploaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImageMetadata {
    pub title: String,
    pub description: String,
    pub category: String,
    pub is_featured: bool,
    pub order_index: i32,
}

impl GalleryImageMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category: default_category(),
            is_featured: false,
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

    pub fn featured(mut self, is_featured: bool) -> Self {
        self.is_featured = is_featured;
        self
    }

    pub fn with_order_index(mut self, order_index: i32) -> Self {
        self.order_index = order_index;
        self
    }

    pub fn validate(&self) -> ValidationResult {
        validate_required_text(&self.title, "title", MAX_NAME_LEN)?;
        validate_text(&self.description, "description", MAX_NOTE_LEN)?;
        validate_choice(&self.category, "category", GALLERY_CATEGORIES)
    }

    /// Attach the resolved public URL, producing the row to insert
    pub fn into_create(self, image_url: String) -> GalleryImageCreate {
        GalleryImageCreate {
            title: self.title,
            description: self.description,
            image_url,
            category: self.category,
            is_featured: self.is_featured,
            order_index: self.order_index,
        }
    }
}

/// Create gallery image payload (row insert after upload)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImageCreate {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category: String,
    pub is_featured: bool,
    pub order_index: i32,
}

/// Update gallery image payload (metadata only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryImageUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
}

impl GalleryImageUpdate {
    pub fn validate(&self) -> ValidationResult {
        if let Some(title) = &self.title {
            validate_required_text(title, "title", MAX_NAME_LEN)?;
        }
        validate_optional_text(self.description.as_deref(), "description", MAX_NOTE_LEN)?;
        validate_optional_text(self.image_url.as_deref(), "image_url", MAX_URL_LEN)?;
        match &self.category {
            Some(category) => validate_choice(category, "category", GALLERY_CATEGORIES),
            None => Ok(()),
        }
    }

    pub fn apply_to(&self, image: &mut GalleryImage) {
        if let Some(v) = &self.title {
            image.title = v.clone();
        }
        if let Some(v) = &self.description {
            image.description = v.clone();
        }
        if let Some(v) = &self.image_url {
            image.image_url = v.clone();
        }
        if let Some(v) = &self.category {
            image.category = v.clone();
        }
        if let Some(v) = self.is_featured {
            image.is_featured = v;
        }
        if let Some(v) = self.order_index {
            image.order_index = v;
        }
    }
}
