//! Public page, read-only and available without signing in

use salon_client::{
    Backend, ContactInfoStore, GalleryStore, OpeningHoursStore, ServiceScope, ServiceStore,
    SiteContentStore,
};

use super::ensure_loaded;
use crate::render::PublicPage;

pub async fn run(backend: &Backend, slide: usize) -> anyhow::Result<String> {
    let (content, services, gallery, hours, contact) = tokio::join!(
        SiteContentStore::mount(backend.content.clone()),
        ServiceStore::mount(backend.services.clone(), ServiceScope::ActiveOnly),
        GalleryStore::mount(backend.gallery.clone(), backend.storage.clone()),
        OpeningHoursStore::mount(backend.hours.clone()),
        ContactInfoStore::mount(backend.contact.clone()),
    );

    for error in [
        content.error(),
        services.error(),
        gallery.error(),
        hours.error(),
        contact.error(),
    ] {
        ensure_loaded(error)?;
    }

    let page = PublicPage {
        content: content.content(),
        services: services.services(),
        gallery: gallery.images(),
        hours: hours.hours(),
        contact: contact.contact_info(),
        slide,
    };
    Ok(page.render())
}
