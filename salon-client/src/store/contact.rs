//! Contact details store (single row)

use std::sync::Arc;

use shared::models::{ContactInfo, ContactInfoUpdate};
use tokio_util::sync::CancellationToken;

use super::{EntityState, cancellable};
use crate::ClientResult;
use crate::repository::ContactInfoRepository;

pub struct ContactInfoStore {
    repo: Arc<dyn ContactInfoRepository>,
    state: EntityState<Option<ContactInfo>>,
    cancel: CancellationToken,
}

impl ContactInfoStore {
    pub fn new(repo: Arc<dyn ContactInfoRepository>) -> Self {
        Self {
            repo,
            state: EntityState::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub async fn mount(repo: Arc<dyn ContactInfoRepository>) -> Self {
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

    pub fn state(&self) -> &EntityState<Option<ContactInfo>> {
        &self.state
    }

    /// `None` until a row exists
    pub fn contact_info(&self) -> Option<&ContactInfo> {
        self.state.items.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// An empty table is not an error
    pub async fn fetch(&mut self) -> ClientResult<()> {
        let loading = self.state.begin_loading();
        let result = cancellable(&self.cancel, self.repo.get_first()).await;
        loading.commit(result)
    }

    /// Update the cached row by id, or insert the first row if none is cached
    pub async fn update_contact_info(&mut self, data: ContactInfoUpdate) -> ClientResult<ContactInfo> {
        if let Err(e) = data.validate() {
            return Err(self.state.fail(e.into()));
        }

        let result = match self.state.items.as_ref().map(|c| c.id) {
            Some(id) => cancellable(&self.cancel, self.repo.update(id, &data)).await,
            None => cancellable(&self.cancel, self.repo.insert(&data)).await,
        };
        let saved = self.state.settle(result)?;
        tracing::info!(id = %saved.id, "Contact info saved");

        self.fetch().await?;
        Ok(saved)
    }
}

impl std::fmt::Debug for ContactInfoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactInfoStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
