//! hours tab

use salon_client::models::OpeningHourUpdate;
use salon_client::{Backend, OpeningHoursStore};

use super::ensure_loaded;
use crate::cli::HoursCommand;
use crate::render;

pub async fn run(cmd: HoursCommand, backend: &Backend) -> anyhow::Result<String> {
    let mut store = OpeningHoursStore::mount(backend.hours.clone()).await;
    ensure_loaded(store.error())?;

    let (day, update) = match cmd {
        HoursCommand::List => return Ok(render::hours(store.hours())),
        HoursCommand::Open { day, from, to } => (day, OpeningHourUpdate::open(from, to)),
        HoursCommand::Close { day } => (day, OpeningHourUpdate::closed()),
    };

    store.update_hours(day, update).await?;
    Ok(render::hours(store.hours()))
}
