//! Data models
//!
//! Rows of the hosted backend's tables plus the create/update payloads
//! sent back to it. All IDs are UUIDs assigned by the backend.

pub mod contact_info;
pub mod gallery_image;
pub mod opening_hour;
pub mod service;
pub mod site_content;

// Re-exports
pub use contact_info::*;
pub use gallery_image::*;
pub use opening_hour::*;
pub use service::*;
pub use site_content::*;
