//! content tab

use anyhow::bail;
use salon_client::{Backend, SiteContentStore};
use shared::content::{content_field, default_content};

use super::ensure_loaded;
use crate::cli::ContentCommand;
use crate::render;

pub async fn run(cmd: ContentCommand, backend: &Backend) -> anyhow::Result<String> {
    let mut store = SiteContentStore::mount(backend.content.clone()).await;
    ensure_loaded(store.error())?;

    match cmd {
        ContentCommand::List => Ok(render::content_catalogue(store.content())),
        ContentCommand::Get { section, key } => {
            let value = store.get_content(&section, &key, default_content(&section, &key));
            Ok(format!("{value}\n"))
        }
        ContentCommand::Set {
            section,
            key,
            value,
        } => {
            if content_field(&section, &key).is_none() {
                bail!("unknown content field {section}.{key} (see `salon-admin content list`)");
            }
            store.update_content(&section, &key, &value).await?;
            Ok(format!("Saved {section}.{key}\n"))
        }
    }
}
