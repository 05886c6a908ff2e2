//! Gallery store: image rows plus the file upload flow

use std::sync::Arc;

use shared::models::{GalleryImage, GalleryImageMetadata, GalleryImageUpdate};
use shared::validation::validate_image_upload;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::{EntityState, cancellable};
use crate::repository::{GalleryRepository, ImageStorage};
use crate::{ClientError, ClientResult};

/// Folder inside the bucket that receives gallery files
pub const GALLERY_FOLDER: &str = "gallery";

pub struct GalleryStore {
    repo: Arc<dyn GalleryRepository>,
    storage: Arc<dyn ImageStorage>,
    state: EntityState<Vec<GalleryImage>>,
    cancel: CancellationToken,
}

impl GalleryStore {
    pub fn new(repo: Arc<dyn GalleryRepository>, storage: Arc<dyn ImageStorage>) -> Self {
        Self {
            repo,
            storage,
            state: EntityState::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub async fn mount(repo: Arc<dyn GalleryRepository>, storage: Arc<dyn ImageStorage>) -> Self {
        let mut store = Self::new(repo, storage);
        let _ = store.fetch().await;
        store
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn state(&self) -> &EntityState<Vec<GalleryImage>> {
        &self.state
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.state.items
    }

    pub fn loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub async fn fetch(&mut self) -> ClientResult<()> {
        let loading = self.state.begin_loading();
        let result = cancellable(&self.cancel, self.repo.list()).await;
        loading.commit(result)
    }

    /// Store the file under a fresh name, then record it in the gallery.
    ///
    /// If the file is stored but the row cannot be written, the error is
    /// [`ClientError::OrphanedUpload`] naming the stored path. The file is
    /// left in place.
    pub async fn upload_image(
        &mut self,
        file_name: &str,
        bytes: Vec<u8>,
        metadata: GalleryImageMetadata,
    ) -> ClientResult<GalleryImage> {
        let ext = match metadata
            .validate()
            .and_then(|_| validate_image_upload(file_name, bytes.len()))
        {
            Ok(ext) => ext,
            Err(e) => return Err(self.state.fail(e.into())),
        };

        let path = format!("{GALLERY_FOLDER}/{}.{ext}", Uuid::new_v4());
        let content_type = mime_guess::from_ext(&ext).first_or_octet_stream();

        let result = cancellable(
            &self.cancel,
            self.storage.upload(&path, bytes, content_type.essence_str()),
        )
        .await;
        let stored = self.state.settle(result)?;
        tracing::debug!(path = %stored, "Gallery file stored");

        let image_url = self.storage.public_url(&stored);
        let create = metadata.into_create(image_url);
        let created = match cancellable(&self.cancel, self.repo.insert(&create)).await {
            Ok(image) => image,
            Err(e) => {
                let orphaned = ClientError::OrphanedUpload {
                    path: stored,
                    reason: e.to_string(),
                };
                // a cancelled insert still leaves the file behind, but
                // nothing is committed to state
                if matches!(e, ClientError::Cancelled) {
                    return Err(orphaned);
                }
                return Err(self.state.fail(orphaned));
            }
        };
        tracing::info!(id = %created.id, url = %created.image_url, "Gallery image added");

        self.fetch().await?;
        Ok(created)
    }

    pub async fn update(&mut self, id: Uuid, data: GalleryImageUpdate) -> ClientResult<GalleryImage> {
        if let Err(e) = data.validate() {
            return Err(self.state.fail(e.into()));
        }
        let result = cancellable(&self.cancel, self.repo.update(id, &data)).await;
        let updated = self.state.settle(result)?;
        tracing::info!(id = %id, "Gallery image updated");

        self.fetch().await?;
        Ok(updated)
    }

    /// Remove the gallery row. The stored file is not deleted.
    pub async fn delete(&mut self, id: Uuid) -> ClientResult<()> {
        let result = cancellable(&self.cancel, self.repo.delete(id)).await;
        self.state.settle(result)?;
        tracing::info!(id = %id, "Gallery image deleted");

        self.fetch().await
    }
}

impl std::fmt::Debug for GalleryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
