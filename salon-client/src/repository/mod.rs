//! Repository Module
//!
//! One narrow port per entity. The stores only ever talk to these traits,
//! so the hosted backend (`rest`) and the in-process fake (`memory`) are
//! interchangeable.

pub mod memory;
pub mod rest;

use std::sync::Arc;

use async_trait::async_trait;
use shared::models::{
    ContactInfo, ContactInfoUpdate, GalleryImage, GalleryImageCreate, GalleryImageUpdate,
    OpeningHour, OpeningHourUpdate, Service, ServiceCreate, ServiceUpdate, SiteContent,
    SiteContentUpsert,
};
use uuid::Uuid;

use crate::ClientResult;

pub use memory::MemoryBackend;

// Table names
pub const SERVICES_TABLE: &str = "services";
pub const GALLERY_TABLE: &str = "gallery_images";
pub const OPENING_HOURS_TABLE: &str = "opening_hours";
pub const SITE_CONTENT_TABLE: &str = "site_content";
pub const CONTACT_INFO_TABLE: &str = "contact_info";

/// Which services a listing returns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ServiceScope {
    /// `is_active = true` only (public page and default admin view)
    #[default]
    ActiveOnly,
    /// Every service, including deactivated ones
    All,
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Services in `scope`, ordered by `order_index` ascending
    async fn list(&self, scope: ServiceScope) -> ClientResult<Vec<Service>>;
    async fn get(&self, id: Uuid) -> ClientResult<Option<Service>>;
    async fn insert(&self, data: &ServiceCreate) -> ClientResult<Service>;
    async fn update(&self, id: Uuid, data: &ServiceUpdate) -> ClientResult<Service>;
    async fn delete(&self, id: Uuid) -> ClientResult<()>;
}

#[async_trait]
pub trait GalleryRepository: Send + Sync {
    /// Images ordered by `order_index` ascending
    async fn list(&self) -> ClientResult<Vec<GalleryImage>>;
    async fn get(&self, id: Uuid) -> ClientResult<Option<GalleryImage>>;
    async fn insert(&self, data: &GalleryImageCreate) -> ClientResult<GalleryImage>;
    async fn update(&self, id: Uuid, data: &GalleryImageUpdate) -> ClientResult<GalleryImage>;
    async fn delete(&self, id: Uuid) -> ClientResult<()>;
}

/// Binary storage for gallery files
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Store a file, returning its path inside the bucket
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> ClientResult<String>;
    fn public_url(&self, path: &str) -> String;
}

/// The seven weekday rows are provisioned by the backend; they are only
/// ever read and edited.
#[async_trait]
pub trait OpeningHoursRepository: Send + Sync {
    /// Rows ordered by `day_of_week` ascending
    async fn list(&self) -> ClientResult<Vec<OpeningHour>>;
    async fn update(&self, day_of_week: u8, data: &OpeningHourUpdate) -> ClientResult<OpeningHour>;
}

#[async_trait]
pub trait SiteContentRepository: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<SiteContent>>;
    /// Insert or overwrite the row keyed on (section, key)
    async fn upsert(&self, data: &SiteContentUpsert) -> ClientResult<SiteContent>;
}

#[async_trait]
pub trait ContactInfoRepository: Send + Sync {
    /// The singleton row, `None` if the table is empty
    async fn get_first(&self) -> ClientResult<Option<ContactInfo>>;
    async fn insert(&self, data: &ContactInfoUpdate) -> ClientResult<ContactInfo>;
    async fn update(&self, id: Uuid, data: &ContactInfoUpdate) -> ClientResult<ContactInfo>;
}

/// One adapter per port
#[derive(Clone)]
pub struct Backend {
    pub services: Arc<dyn ServiceRepository>,
    pub gallery: Arc<dyn GalleryRepository>,
    pub storage: Arc<dyn ImageStorage>,
    pub hours: Arc<dyn OpeningHoursRepository>,
    pub content: Arc<dyn SiteContentRepository>,
    pub contact: Arc<dyn ContactInfoRepository>,
}

impl Backend {
    /// Every port backed by the hosted service
    pub fn rest(client: crate::RestClient) -> Self {
        let bucket = client.config().storage_bucket.clone();
        Self {
            services: Arc::new(rest::RestServiceRepository::new(client.clone())),
            gallery: Arc::new(rest::RestGalleryRepository::new(client.clone())),
            storage: Arc::new(rest::RestImageStorage::new(client.clone(), bucket)),
            hours: Arc::new(rest::RestOpeningHoursRepository::new(client.clone())),
            content: Arc::new(rest::RestSiteContentRepository::new(client.clone())),
            contact: Arc::new(rest::RestContactInfoRepository::new(client)),
        }
    }

    /// Every port backed by one shared in-memory fake
    pub fn memory(backend: MemoryBackend) -> Self {
        Self {
            services: Arc::new(backend.clone()),
            gallery: Arc::new(backend.clone()),
            storage: Arc::new(backend.clone()),
            hours: Arc::new(backend.clone()),
            content: Arc::new(backend.clone()),
            contact: Arc::new(backend),
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend").finish_non_exhaustive()
    }
}
