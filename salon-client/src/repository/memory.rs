//! In-process backend
//!
//! Implements every repository port over shared in-memory tables. Used by the
//! store tests and by anything that needs a backend without a network. A
//! failure can be armed per operation; it fires on the next matching call
//! and is then disarmed.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use shared::models::{
    ContactInfo, ContactInfoUpdate, GalleryImage, GalleryImageCreate, GalleryImageUpdate,
    OpeningHour, OpeningHourUpdate, Service, ServiceCreate, ServiceUpdate, SiteContent,
    SiteContentUpsert,
};
use uuid::Uuid;

use super::{
    CONTACT_INFO_TABLE, ContactInfoRepository, GALLERY_TABLE, GalleryRepository, ImageStorage,
    OPENING_HOURS_TABLE, OpeningHoursRepository, SERVICES_TABLE, ServiceRepository, ServiceScope,
    SiteContentRepository,
};
use crate::{ClientError, ClientResult};

/// Operation a failure can be armed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Insert,
    Update,
    Delete,
    Upsert,
    Upload,
}

/// File kept by the fake object storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Default)]
struct Tables {
    services: Vec<Service>,
    gallery: Vec<GalleryImage>,
    files: BTreeMap<String, StoredFile>,
    hours: Vec<OpeningHour>,
    content: Vec<SiteContent>,
    contact: Vec<ContactInfo>,
    armed: HashMap<Operation, String>,
    calls: HashMap<Operation, usize>,
}

impl Tables {
    /// Count the call and fire the armed failure, if any
    fn enter(&mut self, op: Operation) -> ClientResult<()> {
        *self.calls.entry(op).or_default() += 1;
        match self.armed.remove(&op) {
            Some(message) => Err(ClientError::Api {
                status: 500,
                code: None,
                message,
                details: None,
            }),
            None => Ok(()),
        }
    }
}

/// Shared in-memory tables; clones see the same data
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    tables: Arc<Mutex<Tables>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Empty tables except the seven opening-hours rows (Sunday closed,
    /// Monday to Saturday 09:00:00 - 18:00:00)
    pub fn new() -> Self {
        let hours = (0..7u8)
            .map(|day| {
                let is_open = day != 0;
                OpeningHour {
                    id: Uuid::new_v4(),
                    day_of_week: day,
                    is_open,
                    opening_time: is_open.then(|| "09:00:00".to_string()),
                    closing_time: is_open.then(|| "18:00:00".to_string()),
                    updated_at: None,
                }
            })
            .collect();

        Self {
            tables: Arc::new(Mutex::new(Tables {
                hours,
                ..Default::default()
            })),
        }
    }

    /// Fail the next call of `op` with `message`
    pub fn fail_next(&self, op: Operation, message: impl Into<String>) {
        self.tables.lock().armed.insert(op, message.into());
    }

    /// How many times `op` was called (including failed calls)
    pub fn calls(&self, op: Operation) -> usize {
        self.tables.lock().calls.get(&op).copied().unwrap_or(0)
    }

    pub fn services(&self) -> Vec<Service> {
        self.tables.lock().services.clone()
    }

    pub fn gallery_images(&self) -> Vec<GalleryImage> {
        self.tables.lock().gallery.clone()
    }

    pub fn files(&self) -> BTreeMap<String, StoredFile> {
        self.tables.lock().files.clone()
    }

    pub fn opening_hours(&self) -> Vec<OpeningHour> {
        self.tables.lock().hours.clone()
    }

    pub fn site_content(&self) -> Vec<SiteContent> {
        self.tables.lock().content.clone()
    }

    pub fn contact_rows(&self) -> Vec<ContactInfo> {
        self.tables.lock().contact.clone()
    }

    /// Put a content row directly, bypassing the upsert path
    pub fn seed_content(&self, section: &str, key: &str, value: &str) {
        self.tables.lock().content.push(SiteContent {
            id: Uuid::new_v4(),
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            content_type: shared::models::CONTENT_TYPE_TEXT.to_string(),
            updated_at: None,
        });
    }

    /// Put a contact row directly, bypassing the insert path
    pub fn seed_contact(&self, phone: &str, email: &str, address: &str) -> ContactInfo {
        let info = ContactInfo {
            id: Uuid::new_v4(),
            phone: phone.to_string(),
            email: email.to_string(),
            address: address.to_string(),
            updated_at: None,
        };
        self.tables.lock().contact.push(info.clone());
        info
    }
}

fn not_found(table: &str, key: impl std::fmt::Display) -> ClientError {
    ClientError::not_found(format!("{table} {key}"))
}

// ========== Services ==========

#[async_trait]
impl ServiceRepository for MemoryBackend {
    async fn list(&self, scope: ServiceScope) -> ClientResult<Vec<Service>> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::List)?;
        let mut rows: Vec<Service> = tables
            .services
            .iter()
            .filter(|s| scope == ServiceScope::All || s.is_active)
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.order_index);
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> ClientResult<Option<Service>> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::Get)?;
        Ok(tables.services.iter().find(|s| s.id == id).cloned())
    }

    async fn insert(&self, data: &ServiceCreate) -> ClientResult<Service> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::Insert)?;
        let now = Utc::now();
        let service = Service {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            description: data.description.clone(),
            price_from: data.price_from,
            icon: data.icon.clone(),
            category: data.category.clone(),
            is_active: data.is_active,
            order_index: data.order_index,
            created_at: Some(now),
            updated_at: Some(now),
        };
        tables.services.push(service.clone());
        Ok(service)
    }

    async fn update(&self, id: Uuid, data: &ServiceUpdate) -> ClientResult<Service> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::Update)?;
        let service = tables
            .services
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found(SERVICES_TABLE, id))?;
        data.apply_to(service);
        service.updated_at = Some(Utc::now());
        Ok(service.clone())
    }

    async fn delete(&self, id: Uuid) -> ClientResult<()> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::Delete)?;
        tables.services.retain(|s| s.id != id);
        Ok(())
    }
}

// ========== Gallery ==========

#[async_trait]
impl GalleryRepository for MemoryBackend {
    async fn list(&self) -> ClientResult<Vec<GalleryImage>> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::List)?;
        let mut rows = tables.gallery.clone();
        rows.sort_by_key(|i| i.order_index);
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> ClientResult<Option<GalleryImage>> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::Get)?;
        Ok(tables.gallery.iter().find(|i| i.id == id).cloned())
    }

    async fn insert(&self, data: &GalleryImageCreate) -> ClientResult<GalleryImage> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::Insert)?;
        let now = Utc::now();
        let image = GalleryImage {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            description: data.description.clone(),
            image_url: data.image_url.clone(),
            category: data.category.clone(),
            is_featured: data.is_featured,
            order_index: data.order_index,
            created_at: Some(now),
            updated_at: Some(now),
        };
        tables.gallery.push(image.clone());
        Ok(image)
    }

    async fn update(&self, id: Uuid, data: &GalleryImageUpdate) -> ClientResult<GalleryImage> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::Update)?;
        let image = tables
            .gallery
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| not_found(GALLERY_TABLE, id))?;
        data.apply_to(image);
        image.updated_at = Some(Utc::now());
        Ok(image.clone())
    }

    async fn delete(&self, id: Uuid) -> ClientResult<()> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::Delete)?;
        tables.gallery.retain(|i| i.id != id);
        Ok(())
    }
}

#[async_trait]
impl ImageStorage for MemoryBackend {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> ClientResult<String> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::Upload)?;
        if tables.files.contains_key(path) {
            return Err(ClientError::Api {
                status: 409,
                code: Some("Duplicate".to_string()),
                message: "The resource already exists".to_string(),
                details: None,
            });
        }
        tables.files.insert(
            path.to_string(),
            StoredFile {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(path.to_string())
    }

    fn public_url(&self, path: &str) -> String {
        format!("memory://images/{path}")
    }
}

// ========== Opening hours ==========

#[async_trait]
impl OpeningHoursRepository for MemoryBackend {
    async fn list(&self) -> ClientResult<Vec<OpeningHour>> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::List)?;
        let mut rows = tables.hours.clone();
        rows.sort_by_key(|h| h.day_of_week);
        Ok(rows)
    }

    async fn update(&self, day_of_week: u8, data: &OpeningHourUpdate) -> ClientResult<OpeningHour> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::Update)?;
        let hour = tables
            .hours
            .iter_mut()
            .find(|h| h.day_of_week == day_of_week)
            .ok_or_else(|| not_found(OPENING_HOURS_TABLE, format!("day {day_of_week}")))?;
        data.apply_to(hour);
        hour.updated_at = Some(Utc::now());
        Ok(hour.clone())
    }
}

// ========== Site content ==========

#[async_trait]
impl SiteContentRepository for MemoryBackend {
    async fn list(&self) -> ClientResult<Vec<SiteContent>> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::List)?;
        Ok(tables.content.clone())
    }

    async fn upsert(&self, data: &SiteContentUpsert) -> ClientResult<SiteContent> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::Upsert)?;
        let now = Some(Utc::now());

        if let Some(row) = tables
            .content
            .iter_mut()
            .find(|r| r.section == data.section && r.key == data.key)
        {
            row.value = data.value.clone();
            row.content_type = data.content_type.clone();
            row.updated_at = now;
            return Ok(row.clone());
        }

        let row = SiteContent {
            id: Uuid::new_v4(),
            section: data.section.clone(),
            key: data.key.clone(),
            value: data.value.clone(),
            content_type: data.content_type.clone(),
            updated_at: now,
        };
        tables.content.push(row.clone());
        Ok(row)
    }
}

// ========== Contact info ==========

#[async_trait]
impl ContactInfoRepository for MemoryBackend {
    async fn get_first(&self) -> ClientResult<Option<ContactInfo>> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::Get)?;
        Ok(tables.contact.first().cloned())
    }

    async fn insert(&self, data: &ContactInfoUpdate) -> ClientResult<ContactInfo> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::Insert)?;
        let info = ContactInfo {
            id: Uuid::new_v4(),
            phone: data.phone.clone().unwrap_or_default(),
            email: data.email.clone().unwrap_or_default(),
            address: data.address.clone().unwrap_or_default(),
            updated_at: Some(Utc::now()),
        };
        tables.contact.push(info.clone());
        Ok(info)
    }

    async fn update(&self, id: Uuid, data: &ContactInfoUpdate) -> ClientResult<ContactInfo> {
        let mut tables = self.tables.lock();
        tables.enter(Operation::Update)?;
        let info = tables
            .contact
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found(CONTACT_INFO_TABLE, id))?;
        data.apply_to(info);
        info.updated_at = Some(Utc::now());
        Ok(info.clone())
    }
}
