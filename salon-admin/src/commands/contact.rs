//! contact tab

use anyhow::bail;
use salon_client::models::ContactInfoUpdate;
use salon_client::{Backend, ContactInfoStore};

use super::ensure_loaded;
use crate::cli::ContactCommand;
use crate::render;

pub async fn run(cmd: ContactCommand, backend: &Backend) -> anyhow::Result<String> {
    let mut store = ContactInfoStore::mount(backend.contact.clone()).await;
    ensure_loaded(store.error())?;

    match cmd {
        ContactCommand::Show => Ok(render::contact(store.contact_info())),
        ContactCommand::Set {
            phone,
            email,
            address,
        } => {
            let data = ContactInfoUpdate {
                phone,
                email,
                address,
            };
            if data.is_empty() {
                bail!("nothing to change: pass --phone, --email or --address");
            }
            store.update_contact_info(data).await?;
            Ok(render::contact(store.contact_info()))
        }
    }
}
