//! Service catalogue store

use std::sync::Arc;

use shared::models::{Service, ServiceCreate, ServiceUpdate};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::{EntityState, cancellable};
use crate::ClientResult;
use crate::repository::{ServiceRepository, ServiceScope};

pub struct ServiceStore {
    repo: Arc<dyn ServiceRepository>,
    scope: ServiceScope,
    state: EntityState<Vec<Service>>,
    cancel: CancellationToken,
}

impl ServiceStore {
    /// Active services only, nothing loaded yet
    pub fn new(repo: Arc<dyn ServiceRepository>) -> Self {
        Self {
            repo,
            scope: ServiceScope::default(),
            state: EntityState::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Create and run the initial fetch. A failed fetch is kept in `error()`.
    pub async fn mount(repo: Arc<dyn ServiceRepository>, scope: ServiceScope) -> Self {
        let mut store = Self::new(repo).with_scope(scope);
        let _ = store.fetch().await;
        store
    }

    pub fn with_scope(mut self, scope: ServiceScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn state(&self) -> &EntityState<Vec<Service>> {
        &self.state
    }

    pub fn services(&self) -> &[Service] {
        &self.state.items
    }

    pub fn loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn scope(&self) -> ServiceScope {
        self.scope
    }

    pub async fn fetch(&mut self) -> ClientResult<()> {
        let loading = self.state.begin_loading();
        let result = cancellable(&self.cancel, self.repo.list(self.scope)).await;
        loading.commit(result)
    }

    pub async fn create(&mut self, data: ServiceCreate) -> ClientResult<Service> {
        if let Err(e) = data.validate() {
            return Err(self.state.fail(e.into()));
        }
        let result = cancellable(&self.cancel, self.repo.insert(&data)).await;
        let created = self.state.settle(result)?;
        tracing::info!(id = %created.id, name = %created.name, "Service created");

        self.fetch().await?;
        Ok(created)
    }

    pub async fn update(&mut self, id: Uuid, data: ServiceUpdate) -> ClientResult<Service> {
        if let Err(e) = data.validate() {
            return Err(self.state.fail(e.into()));
        }
        let result = cancellable(&self.cancel, self.repo.update(id, &data)).await;
        let updated = self.state.settle(result)?;
        tracing::info!(id = %id, "Service updated");

        self.fetch().await?;
        Ok(updated)
    }

    pub async fn delete(&mut self, id: Uuid) -> ClientResult<()> {
        let result = cancellable(&self.cancel, self.repo.delete(id)).await;
        self.state.settle(result)?;
        tracing::info!(id = %id, "Service deleted");

        self.fetch().await
    }
}

impl std::fmt::Debug for ServiceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceStore")
            .field("scope", &self.scope)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
