//! Entity stores
//!
//! Each store caches one entity collection and exposes `fetch` plus the
//! entity's mutators. They all follow the same contract:
//!
//! - `loading` starts `true` and is `false` again once any fetch ends,
//!   whichever way it ends.
//! - A successful fetch replaces the cache wholesale and clears `error`.
//!   A failed one records the message and leaves the cache alone.
//! - A mutator validates its input, issues one write and refetches on
//!   success. On failure it records the message and skips the refetch.
//! - Once the store's cancellation token fires, in-flight requests are
//!   abandoned with [`ClientError::Cancelled`] and nothing is committed.

mod contact;
mod content;
mod gallery;
mod hours;
mod services;

pub use contact::ContactInfoStore;
pub use content::SiteContentStore;
pub use gallery::GalleryStore;
pub use hours::OpeningHoursStore;
pub use services::ServiceStore;

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::{ClientError, ClientResult};

/// Observable state of a store
#[derive(Debug, Clone, PartialEq)]
pub struct EntityState<T> {
    pub items: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T: Default> Default for EntityState<T> {
    fn default() -> Self {
        Self {
            items: T::default(),
            loading: true,
            error: None,
        }
    }
}

impl<T> EntityState<T> {
    /// Record a failure and hand it back. Cancellation is not recorded.
    pub(crate) fn fail(&mut self, err: ClientError) -> ClientError {
        if !matches!(err, ClientError::Cancelled) {
            tracing::warn!("{}", err);
            self.error = Some(err.to_string());
        }
        err
    }

    /// Pass a write result through, recording the failure if there is one
    pub(crate) fn settle<R>(&mut self, result: ClientResult<R>) -> ClientResult<R> {
        result.map_err(|e| self.fail(e))
    }

    /// Mark a fetch in progress until the returned guard is dropped
    pub(crate) fn begin_loading(&mut self) -> Loading<'_, T> {
        self.loading = true;
        Loading { state: self }
    }
}

/// Fetch in progress; clears `loading` when dropped
pub(crate) struct Loading<'a, T> {
    state: &'a mut EntityState<T>,
}

impl<T> Loading<'_, T> {
    /// Commit a fetch result
    pub(crate) fn commit(self, result: ClientResult<T>) -> ClientResult<()> {
        match result {
            Ok(items) => {
                self.state.items = items;
                self.state.error = None;
                Ok(())
            }
            Err(e) => Err(self.state.fail(e)),
        }
    }
}

impl<T> Drop for Loading<'_, T> {
    fn drop(&mut self) {
        self.state.loading = false;
    }
}

/// Run `request` unless `token` fires first
pub(crate) async fn cancellable<F, R>(token: &CancellationToken, request: F) -> ClientResult<R>
where
    F: Future<Output = ClientResult<R>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(ClientError::Cancelled),
        result = request => result,
    }
}
