//! Weekly opening hours store

use std::sync::Arc;

use shared::models::{OpeningHour, OpeningHourUpdate};
use shared::validation::validate_day_of_week;
use tokio_util::sync::CancellationToken;

use super::{EntityState, cancellable};
use crate::ClientResult;
use crate::repository::OpeningHoursRepository;

pub struct OpeningHoursStore {
    repo: Arc<dyn OpeningHoursRepository>,
    state: EntityState<Vec<OpeningHour>>,
    cancel: CancellationToken,
}

impl OpeningHoursStore {
    pub fn new(repo: Arc<dyn OpeningHoursRepository>) -> Self {
        Self {
            repo,
            state: EntityState::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub async fn mount(repo: Arc<dyn OpeningHoursRepository>) -> Self {
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

    pub fn state(&self) -> &EntityState<Vec<OpeningHour>> {
        &self.state
    }

    /// Rows ordered Sunday (0) to Saturday (6)
    pub fn hours(&self) -> &[OpeningHour] {
        &self.state.items
    }

    pub fn hour(&self, day_of_week: u8) -> Option<&OpeningHour> {
        self.state
            .items
            .iter()
            .find(|h| h.day_of_week == day_of_week)
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

    /// Patch the row for `day_of_week`. Fields left `None` keep their value.
    pub async fn update_hours(
        &mut self,
        day_of_week: u8,
        data: OpeningHourUpdate,
    ) -> ClientResult<OpeningHour> {
        let checked = validate_day_of_week(day_of_week)
            .and_then(|_| data.validate_against(self.hour(day_of_week)));
        if let Err(e) = checked {
            return Err(self.state.fail(e.into()));
        }

        let result = cancellable(&self.cancel, self.repo.update(day_of_week, &data)).await;
        let updated = self.state.settle(result)?;
        tracing::info!(
            day = day_of_week,
            is_open = updated.is_open,
            "Opening hours updated"
        );

        self.fetch().await?;
        Ok(updated)
    }

    /// English weekday name, `None` outside 0..=6
    pub fn day_name(day_of_week: u8) -> Option<&'static str> {
        shared::day_name(day_of_week)
    }

    /// `HH:MM` display form of a stored time, empty when unset
    pub fn format_time(time: Option<&str>) -> String {
        shared::format_time(time)
    }
}

impl std::fmt::Debug for OpeningHoursStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpeningHoursStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
