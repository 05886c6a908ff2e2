//! Salon Client - data access for the salon website
//!
//! Talks to the hosted backend (tables, object storage, password auth) and
//! wraps each entity in a store that caches it with loading/error state.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod repository;
pub mod storage;
pub mod store;

pub use auth::{AuthEvent, AuthSession, AuthSubscription, AuthUser, Session};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::RestClient;
pub use query::{Filter, Order, Query};
pub use repository::{Backend, MemoryBackend, ServiceScope};
pub use store::{
    ContactInfoStore, EntityState, GalleryStore, OpeningHoursStore, ServiceStore,
    SiteContentStore,
};

// Re-export shared types for convenience
pub use shared::models;
