//! gallery tab

use anyhow::Context;
use salon_client::models::{GalleryImageMetadata, GalleryImageUpdate};
use salon_client::{Backend, GalleryStore};

use super::ensure_loaded;
use crate::cli::GalleryCommand;
use crate::render;

pub async fn run(cmd: GalleryCommand, backend: &Backend) -> anyhow::Result<String> {
    let store = || GalleryStore::new(backend.gallery.clone(), backend.storage.clone());

    match cmd {
        GalleryCommand::List => {
            let store = GalleryStore::mount(backend.gallery.clone(), backend.storage.clone()).await;
            ensure_loaded(store.error())?;
            Ok(render::gallery(store.images()))
        }
        GalleryCommand::Upload {
            file,
            title,
            description,
            category,
            featured,
            order,
        } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            let metadata = GalleryImageMetadata::new(title)
                .with_description(description)
                .with_category(category)
                .featured(featured)
                .with_order_index(order);

            let image = store().upload_image(file_name, bytes, metadata).await?;
            Ok(format!("Uploaded {} -> {}\n", image.title, image.image_url))
        }
        GalleryCommand::Edit {
            id,
            title,
            description,
            category,
            featured,
            order,
        } => {
            let data = GalleryImageUpdate {
                title,
                description,
                image_url: None,
                category,
                is_featured: featured,
                order_index: order,
            };
            let image = store().update(id, data).await?;
            Ok(format!("Updated image {} ({})\n", image.title, image.id))
        }
        GalleryCommand::Remove { id } => {
            store().delete(id).await?;
            Ok(format!("Removed image {id}\n"))
        }
    }
}
