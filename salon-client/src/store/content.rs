//! Editable site text store

use std::sync::Arc;

use shared::ContentMap;
use shared::models::{SiteContent, SiteContentUpsert};
use tokio_util::sync::CancellationToken;

use super::{EntityState, cancellable};
use crate::ClientResult;
use crate::repository::SiteContentRepository;

/// Caches site text reshaped as section -> key -> value
pub struct SiteContentStore {
    repo: Arc<dyn SiteContentRepository>,
    state: EntityState<ContentMap>,
    cancel: CancellationToken,
}

impl SiteContentStore {
    pub fn new(repo: Arc<dyn SiteContentRepository>) -> Self {
        Self {
            repo,
            state: EntityState::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub async fn mount(repo: Arc<dyn SiteContentRepository>) -> Self {
        let mut store = Self::new(repo);
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

    pub fn state(&self) -> &EntityState<ContentMap> {
        &self.state
    }

    pub fn content(&self) -> &ContentMap {
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
        let result = cancellable(&self.cancel, self.repo.list())
            .await
            .map(|rows| ContentMap::from_rows(&rows));
        loading.commit(result)
    }

    /// Stored value for (section, key), or `default` when absent
    pub fn get_content<'a>(&'a self, section: &str, key: &str, default: &'a str) -> &'a str {
        self.state.items.get(section, key, default)
    }

    /// Write one text value, creating or overwriting the (section, key) row
    pub async fn update_content(
        &mut self,
        section: &str,
        key: &str,
        value: &str,
    ) -> ClientResult<SiteContent> {
        let data = SiteContentUpsert::text(section, key, value);
        if let Err(e) = data.validate() {
            return Err(self.state.fail(e.into()));
        }
        let result = cancellable(&self.cancel, self.repo.upsert(&data)).await;
        let row = self.state.settle(result)?;
        tracing::info!(section, key, "Site content updated");

        self.fetch().await?;
        Ok(row)
    }
}

impl std::fmt::Debug for SiteContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteContentStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
