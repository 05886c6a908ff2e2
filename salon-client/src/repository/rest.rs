//! Repository adapters over the hosted backend

use async_trait::async_trait;
use shared::models::{
    ContactInfo, ContactInfoUpdate, GalleryImage, GalleryImageCreate, GalleryImageUpdate,
    OpeningHour, OpeningHourUpdate, SITE_CONTENT_CONFLICT_TARGET, Service, ServiceCreate,
    ServiceUpdate, SiteContent, SiteContentUpsert,
};
use uuid::Uuid;

use super::{
    CONTACT_INFO_TABLE, ContactInfoRepository, GALLERY_TABLE, GalleryRepository, ImageStorage,
    OPENING_HOURS_TABLE, OpeningHoursRepository, SERVICES_TABLE, SITE_CONTENT_TABLE,
    ServiceRepository, ServiceScope, SiteContentRepository,
};
use crate::query::{Filter, Order, Query};
use crate::{ClientError, ClientResult, RestClient};

/// First row of a write's representation
fn single<T>(table: &str, rows: Vec<T>) -> ClientResult<T> {
    rows.into_iter()
        .next()
        .ok_or_else(|| ClientError::InvalidResponse(format!("{table}: write returned no row")))
}

/// First row of a keyed write; an empty representation means the key matched nothing
fn matched<T>(table: &str, key: impl std::fmt::Display, rows: Vec<T>) -> ClientResult<T> {
    rows.into_iter()
        .next()
        .ok_or_else(|| ClientError::not_found(format!("{table} {key}")))
}

// ========== Services ==========

#[derive(Debug, Clone)]
pub struct RestServiceRepository {
    client: RestClient,
}

impl RestServiceRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ServiceRepository for RestServiceRepository {
    async fn list(&self, scope: ServiceScope) -> ClientResult<Vec<Service>> {
        let mut query = Query::all();
        if scope == ServiceScope::ActiveOnly {
            query = query.eq("is_active", true);
        }
        let query = query.order_by("order_index", Order::Asc);
        self.client.select(SERVICES_TABLE, &query).await
    }

    async fn get(&self, id: Uuid) -> ClientResult<Option<Service>> {
        let rows: Vec<Service> = self
            .client
            .select(SERVICES_TABLE, &Query::all().eq("id", id).limit(1))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, data: &ServiceCreate) -> ClientResult<Service> {
        let rows = self.client.insert(SERVICES_TABLE, data).await?;
        single(SERVICES_TABLE, rows)
    }

    async fn update(&self, id: Uuid, data: &ServiceUpdate) -> ClientResult<Service> {
        let rows = self
            .client
            .update(SERVICES_TABLE, &Filter::eq("id", id), data)
            .await?;
        matched(SERVICES_TABLE, id, rows)
    }

    async fn delete(&self, id: Uuid) -> ClientResult<()> {
        self.client.delete(SERVICES_TABLE, &Filter::eq("id", id)).await
    }
}

// ========== Gallery ==========

#[derive(Debug, Clone)]
pub struct RestGalleryRepository {
    client: RestClient,
}

impl RestGalleryRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GalleryRepository for RestGalleryRepository {
    async fn list(&self) -> ClientResult<Vec<GalleryImage>> {
        let query = Query::all().order_by("order_index", Order::Asc);
        self.client.select(GALLERY_TABLE, &query).await
    }

    async fn get(&self, id: Uuid) -> ClientResult<Option<GalleryImage>> {
        let rows: Vec<GalleryImage> = self
            .client
            .select(GALLERY_TABLE, &Query::all().eq("id", id).limit(1))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, data: &GalleryImageCreate) -> ClientResult<GalleryImage> {
        let rows = self.client.insert(GALLERY_TABLE, data).await?;
        single(GALLERY_TABLE, rows)
    }

    async fn update(&self, id: Uuid, data: &GalleryImageUpdate) -> ClientResult<GalleryImage> {
        let rows = self
            .client
            .update(GALLERY_TABLE, &Filter::eq("id", id), data)
            .await?;
        matched(GALLERY_TABLE, id, rows)
    }

    async fn delete(&self, id: Uuid) -> ClientResult<()> {
        self.client.delete(GALLERY_TABLE, &Filter::eq("id", id)).await
    }
}

/// Object storage bound to one bucket
#[derive(Debug, Clone)]
pub struct RestImageStorage {
    client: RestClient,
    bucket: String,
}

impl RestImageStorage {
    pub fn new(client: RestClient, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ImageStorage for RestImageStorage {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> ClientResult<String> {
        self.client
            .upload(&self.bucket, path, bytes, content_type)
            .await
    }

    fn public_url(&self, path: &str) -> String {
        self.client.public_url(&self.bucket, path)
    }
}

// ========== Opening hours ==========

#[derive(Debug, Clone)]
pub struct RestOpeningHoursRepository {
    client: RestClient,
}

impl RestOpeningHoursRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OpeningHoursRepository for RestOpeningHoursRepository {
    async fn list(&self) -> ClientResult<Vec<OpeningHour>> {
        let query = Query::all().order_by("day_of_week", Order::Asc);
        self.client.select(OPENING_HOURS_TABLE, &query).await
    }

    async fn update(&self, day_of_week: u8, data: &OpeningHourUpdate) -> ClientResult<OpeningHour> {
        let rows = self
            .client
            .update(
                OPENING_HOURS_TABLE,
                &Filter::eq("day_of_week", day_of_week),
                data,
            )
            .await?;
        matched(OPENING_HOURS_TABLE, format!("day {day_of_week}"), rows)
    }
}

// ========== Site content ==========

#[derive(Debug, Clone)]
pub struct RestSiteContentRepository {
    client: RestClient,
}

impl RestSiteContentRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SiteContentRepository for RestSiteContentRepository {
    async fn list(&self) -> ClientResult<Vec<SiteContent>> {
        self.client.select(SITE_CONTENT_TABLE, &Query::all()).await
    }

    async fn upsert(&self, data: &SiteContentUpsert) -> ClientResult<SiteContent> {
        let rows = self
            .client
            .upsert(SITE_CONTENT_TABLE, data, SITE_CONTENT_CONFLICT_TARGET)
            .await?;
        single(SITE_CONTENT_TABLE, rows)
    }
}

// ========== Contact info ==========

#[derive(Debug, Clone)]
pub struct RestContactInfoRepository {
    client: RestClient,
}

impl RestContactInfoRepository {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContactInfoRepository for RestContactInfoRepository {
    async fn get_first(&self) -> ClientResult<Option<ContactInfo>> {
        let rows: Vec<ContactInfo> = self
            .client
            .select(CONTACT_INFO_TABLE, &Query::all().limit(1))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, data: &ContactInfoUpdate) -> ClientResult<ContactInfo> {
        let rows = self.client.insert(CONTACT_INFO_TABLE, data).await?;
        single(CONTACT_INFO_TABLE, rows)
    }

    async fn update(&self, id: Uuid, data: &ContactInfoUpdate) -> ClientResult<ContactInfo> {
        let rows = self
            .client
            .update(CONTACT_INFO_TABLE, &Filter::eq("id", id), data)
            .await?;
        matched(CONTACT_INFO_TABLE, id, rows)
    }
}
