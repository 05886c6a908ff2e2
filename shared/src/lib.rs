//! Shared types for the salon site
//!
//! Entity models and payloads, input validation, and the pure helpers the
//! pages and the admin shell share: content lookup, weekday/time display,
//! and the gallery carousel index.

pub mod carousel;
pub mod content;
pub mod error;
pub mod models;
pub mod schedule;
pub mod validation;

// Re-exports
pub use carousel::Carousel;
pub use content::{CONTENT_SECTIONS, ContentMap};
pub use error::{ValidationError, ValidationResult};
pub use schedule::{day_name, format_time};
