//! services tab

use salon_client::models::{ServiceCreate, ServiceUpdate};
use salon_client::{Backend, ServiceScope, ServiceStore};

use super::ensure_loaded;
use crate::cli::ServicesCommand;
use crate::render;

pub async fn run(cmd: ServicesCommand, backend: &Backend) -> anyhow::Result<String> {
    match cmd {
        ServicesCommand::List { all } => {
            let scope = if all {
                ServiceScope::All
            } else {
                ServiceScope::ActiveOnly
            };
            let store = ServiceStore::mount(backend.services.clone(), scope).await;
            ensure_loaded(store.error())?;
            Ok(render::services(store.services()))
        }
        ServicesCommand::Add(args) => {
            let mut store = ServiceStore::new(backend.services.clone());
            let data = ServiceCreate::new(args.name, args.price)
                .with_description(args.description)
                .with_category(args.category)
                .with_icon(args.icon)
                .with_order_index(args.order)
                .with_active(!args.inactive);
            let created = store.create(data).await?;
            Ok(format!("Added service {} ({})\n", created.name, created.id))
        }
        ServicesCommand::Edit { id, fields } => {
            let mut store = ServiceStore::new(backend.services.clone());
            let data = ServiceUpdate {
                name: fields.name,
                description: fields.description,
                price_from: fields.price,
                icon: fields.icon,
                category: fields.category,
                is_active: fields.active,
                order_index: fields.order,
            };
            let updated = store.update(id, data).await?;
            Ok(format!("Updated service {} ({})\n", updated.name, updated.id))
        }
        ServicesCommand::Remove { id } => {
            let mut store = ServiceStore::new(backend.services.clone());
            store.delete(id).await?;
            Ok(format!("Removed service {id}\n"))
        }
    }
}
