//! Plain-text rendering of salon data

use std::fmt::Write;

use shared::content::{CONTENT_SECTIONS, default_content};
use shared::models::{ContactInfo, GalleryImage, OpeningHour, Service};
use shared::{Carousel, ContentMap, day_name, format_time};

pub fn services(services: &[Service]) -> String {
    if services.is_empty() {
        return "No services.\n".to_string();
    }
    let mut out = String::new();
    for s in services {
        let _ = writeln!(
            out,
            "{}  {:<28} from {:>7} EUR  [{}]{}",
            s.id,
            s.name,
            s.price_from,
            s.category,
            if s.is_active { "" } else { "  (inactive)" }
        );
    }
    out
}

pub fn gallery(images: &[GalleryImage]) -> String {
    if images.is_empty() {
        return "No images.\n".to_string();
    }
    let mut out = String::new();
    for img in images {
        let _ = writeln!(
            out,
            "{}  {:<28} [{}]{}  {}",
            img.id,
            img.title,
            img.category,
            if img.is_featured { " *" } else { "" },
            img.image_url
        );
    }
    out
}

/// One line per day, e.g. `Monday     09:00 - 18:00` or `Sunday     Closed`
pub fn hours(hours: &[OpeningHour]) -> String {
    let mut out = String::new();
    for h in hours {
        let name = day_name(h.day_of_week).unwrap_or("?");
        if h.is_open {
            let _ = writeln!(
                out,
                "{:<10} {} - {}",
                name,
                format_time(h.opening_time.as_deref()),
                format_time(h.closing_time.as_deref())
            );
        } else {
            let _ = writeln!(out, "{name:<10} Closed");
        }
    }
    out
}

pub fn contact(info: Option<&ContactInfo>) -> String {
    match info {
        Some(c) => format!(
            "Phone:   {}\nEmail:   {}\nAddress: {}\n",
            c.phone, c.email, c.address
        ),
        None => "No contact details yet.\n".to_string(),
    }
}

/// Every catalogue field with its current text; unedited fields are marked
pub fn content_catalogue(content: &ContentMap) -> String {
    let mut out = String::new();
    for section in CONTENT_SECTIONS {
        let _ = writeln!(out, "[{}] {}", section.section, section.title);
        for field in section.fields {
            let value = content.get(section.section, field.key, field.default);
            let edited = content
                .section(section.section)
                .is_some_and(|keys| keys.contains_key(field.key));
            let _ = writeln!(
                out,
                "  {:<12} {}{}",
                field.key,
                value,
                if edited { "" } else { "  (default)" }
            );
        }
    }
    out
}

/// Everything the public page shows
#[derive(Debug, Clone, Copy)]
pub struct PublicPage<'a> {
    pub content: &'a ContentMap,
    pub services: &'a [Service],
    pub gallery: &'a [GalleryImage],
    pub hours: &'a [OpeningHour],
    pub contact: Option<&'a ContactInfo>,
    /// Gallery slide in front; wraps around the image count
    pub slide: usize,
}

impl PublicPage<'_> {
    fn carousel(&self) -> Carousel {
        let mut carousel = Carousel::new(self.gallery.len());
        if !carousel.is_empty() {
            carousel.select(self.slide % carousel.len());
        }
        carousel
    }

    fn text(&self, section: &str, key: &str) -> &str {
        self.content.get(section, key, default_content(section, key))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "{} {}\n{}\n",
            self.text("hero", "title_line1"),
            self.text("hero", "title_line2"),
            self.text("hero", "subtitle")
        );

        let _ = writeln!(
            out,
            "== {} ==\n{}\n",
            self.text("about", "title"),
            self.text("about", "description")
        );

        let _ = writeln!(
            out,
            "== {} ==\n{}",
            self.text("services", "title"),
            self.text("services", "description")
        );
        for s in self.services {
            let _ = writeln!(out, "- {} (à partir de {} €)", s.name, s.price_from);
            if !s.description.is_empty() {
                let _ = writeln!(out, "  {}", s.description);
            }
        }
        out.push('\n');

        let _ = writeln!(
            out,
            "== {} ==\n{}",
            self.text("gallery", "title"),
            self.text("gallery", "description")
        );
        let current = self.carousel();
        for (i, img) in self.gallery.iter().enumerate() {
            if i == current.index() {
                let _ = writeln!(out, "> {}  {}", img.title, img.image_url);
            } else {
                let _ = writeln!(out, "- {}", img.title);
            }
        }
        if !current.is_empty() {
            let _ = writeln!(out, "({}/{})", current.index() + 1, current.len());
        }
        out.push('\n');

        let _ = writeln!(
            out,
            "== {} ==\n{}",
            self.text("contact", "title"),
            self.text("contact", "description")
        );
        out.push_str(&hours(self.hours));
        if let Some(c) = self.contact {
            out.push_str(&contact(Some(c)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn hour(day: u8, open: Option<(&str, &str)>) -> OpeningHour {
        OpeningHour {
            id: Uuid::new_v4(),
            day_of_week: day,
            is_open: open.is_some(),
            opening_time: open.map(|(o, _)| o.to_string()),
            closing_time: open.map(|(_, c)| c.to_string()),
            updated_at: None,
        }
    }

    #[test]
    fn test_hours_lines() {
        let text = hours(&[hour(0, None), hour(1, Some(("09:00:00", "18:30:00")))]);
        assert_eq!(text, "Sunday     Closed\nMonday     09:00 - 18:30\n");
    }

    #[test]
    fn test_catalogue_marks_defaults() {
        let mut content = ContentMap::new();
        content.insert("hero", "subtitle", "Chez nous");
        let text = content_catalogue(&content);
        assert!(text.contains("subtitle     Chez nous\n"));
        assert!(text.contains("title_line1  Votre style,  (default)"));
    }

    #[test]
    fn test_public_page_uses_defaults_and_data() {
        let mut content = ContentMap::new();
        content.insert("about", "title", "Le salon");
        let service = Service {
            id: Uuid::new_v4(),
            name: "Coupe Homme".into(),
            description: String::new(),
            price_from: Decimal::new(25, 0),
            icon: "Scissors".into(),
            category: "coupe".into(),
            is_active: true,
            order_index: 0,
            created_at: None,
            updated_at: None,
        };
        let hours = [hour(2, Some(("09:00", "18:00")))];
        let page = PublicPage {
            content: &content,
            services: std::slice::from_ref(&service),
            gallery: &[],
            hours: &hours,
            contact: None,
            slide: 0,
        };
        let text = page.render();
        assert!(text.starts_with("Votre style, notre signature\n"));
        assert!(text.contains("== Le salon =="));
        assert!(text.contains("- Coupe Homme (à partir de 25 €)"));
        assert!(text.contains("Tuesday    09:00 - 18:00"));
    }

    fn image(title: &str) -> GalleryImage {
        GalleryImage {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            image_url: format!("memory://images/{title}.jpg"),
            category: "salon".into(),
            is_featured: false,
            order_index: 0,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_gallery_slide_wraps() {
        let content = ContentMap::new();
        let images = [image("a"), image("b"), image("c")];
        let mut page = PublicPage {
            content: &content,
            services: &[],
            gallery: &images,
            hours: &[],
            contact: None,
            slide: 1,
        };
        let text = page.render();
        assert!(text.contains("- a\n> b  memory://images/b.jpg\n- c\n(2/3)\n"));

        page.slide = 3;
        let text = page.render();
        assert!(text.contains("> a  memory://images/a.jpg\n- b\n- c\n(1/3)\n"));
    }

    #[test]
    fn test_empty_gallery_has_no_slide() {
        let content = ContentMap::new();
        let page = PublicPage {
            content: &content,
            services: &[],
            gallery: &[],
            hours: &[],
            contact: None,
            slide: 4,
        };
        let text = page.render();
        assert!(!text.contains("(1/"));
        assert!(!text.contains("> "));
    }
}
