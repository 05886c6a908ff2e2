//! Site content resolution
//!
//! The content table is a flat list of `(section, key, value)` rows. Pages
//! read it through a two-level lookup and fall back to built-in copy for
//! anything never edited.

use std::collections::BTreeMap;

use crate::models::SiteContent;

/// Nested section -> key -> value lookup built from content rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentMap {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl ContentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reshape flat rows. A repeated (section, key) keeps the last value.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a SiteContent>,
    {
        let mut map = Self::new();
        for row in rows {
            map.insert(&row.section, &row.key, &row.value);
        }
        map
    }

    pub fn insert(&mut self, section: &str, key: &str, value: &str) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Stored value, or `default` when the section or the key is absent.
    pub fn get<'a>(&'a self, section: &str, key: &str, default: &'a str) -> &'a str {
        self.sections
            .get(section)
            .and_then(|keys| keys.get(key))
            .map(String::as_str)
            .unwrap_or(default)
    }

    pub fn section(&self, section: &str) -> Option<&BTreeMap<String, String>> {
        self.sections.get(section)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, String>)> {
        self.sections.iter().map(|(s, keys)| (s.as_str(), keys))
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

// =============================================================================
// Editable content catalogue
// =============================================================================

/// How the editor presents a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Textarea,
}

/// One editable field and the copy shown until it is edited
#[derive(Debug, Clone, Copy)]
pub struct ContentField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: &'static str,
}

/// One page section of editable copy
#[derive(Debug, Clone, Copy)]
pub struct ContentSection {
    pub section: &'static str,
    pub title: &'static str,
    pub fields: &'static [ContentField],
}

impl ContentSection {
    pub fn field(&self, key: &str) -> Option<&'static ContentField> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Sections and fields exposed by the content editor
pub const CONTENT_SECTIONS: &[ContentSection] = &[
    ContentSection {
        section: "hero",
        title: "Section Hero",
        fields: &[
            ContentField {
                key: "title_line1",
                label: "Titre ligne 1",
                kind: FieldKind::Text,
                default: "Votre style,",
            },
            ContentField {
                key: "title_line2",
                label: "Titre ligne 2",
                kind: FieldKind::Text,
                default: "notre signature",
            },
            ContentField {
                key: "subtitle",
                label: "Sous-titre",
                kind: FieldKind::Textarea,
                default: "Coiffure homme, femme et soins de la barbe au cœur de Lisieux. \
                          Expertise, personnalisation et raffinement dans un cadre chaleureux.",
            },
        ],
    },
    ContentSection {
        section: "about",
        title: "Section À Propos",
        fields: &[
            ContentField {
                key: "title",
                label: "Titre",
                kind: FieldKind::Text,
                default: "Votre salon à Lisieux",
            },
            ContentField {
                key: "description",
                label: "Description",
                kind: FieldKind::Textarea,
                default: "Depuis notre installation au cœur de Lisieux, Normandie Coiffure \
                          propose des services de coiffure homme, femme et soins de la barbe \
                          dans un cadre chaleureux et professionnel.",
            },
        ],
    },
    ContentSection {
        section: "services",
        title: "Section Prestations",
        fields: &[
            ContentField {
                key: "title",
                label: "Titre",
                kind: FieldKind::Text,
                default: "Nos Prestations",
            },
            ContentField {
                key: "description",
                label: "Description",
                kind: FieldKind::Textarea,
                default: "Coiffure homme, femme et soins de la barbe. Des services \
                          d'exception adaptés à tous types de cheveux et tous les styles.",
            },
        ],
    },
    ContentSection {
        section: "gallery",
        title: "Section Galerie",
        fields: &[
            ContentField {
                key: "title",
                label: "Titre",
                kind: FieldKind::Text,
                default: "Galerie & Réalisations",
            },
            ContentField {
                key: "description",
                label: "Description",
                kind: FieldKind::Textarea,
                default: "Découvrez nos créations et l'ambiance chaleureuse de notre salon. \
                          Chaque réalisation raconte une histoire de transformation et \
                          d'élégance.",
            },
        ],
    },
    ContentSection {
        section: "contact",
        title: "Section Contact",
        fields: &[
            ContentField {
                key: "title",
                label: "Titre",
                kind: FieldKind::Text,
                default: "Contact & Horaires",
            },
            ContentField {
                key: "description",
                label: "Description",
                kind: FieldKind::Textarea,
                default: "Situés au cœur de Lisieux, nous vous accueillons dans un cadre \
                          chaleureux pour des services de coiffure homme, femme et soins de \
                          la barbe.",
            },
        ],
    },
];

/// Look up a catalogue entry
pub fn content_field(section: &str, key: &str) -> Option<&'static ContentField> {
    CONTENT_SECTIONS
        .iter()
        .find(|s| s.section == section)
        .and_then(|s| s.field(key))
}

/// Built-in copy for a field, empty for anything outside the catalogue
pub fn default_content(section: &str, key: &str) -> &'static str {
    content_field(section, key).map(|f| f.default).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn row(section: &str, key: &str, value: &str) -> SiteContent {
        SiteContent {
            id: Uuid::new_v4(),
            section: section.into(),
            key: key.into(),
            value: value.into(),
            content_type: "text".into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_from_rows_nests_by_section() {
        let rows = vec![
            row("hero", "title_line1", "Bienvenue"),
            row("hero", "subtitle", "Chez nous"),
            row("about", "title", "Le salon"),
        ];
        let map = ContentMap::from_rows(&rows);

        assert_eq!(map.get("hero", "title_line1", "x"), "Bienvenue");
        assert_eq!(map.get("about", "title", "x"), "Le salon");
        assert_eq!(map.section("hero").map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_get_falls_back_to_default() {
        let map = ContentMap::from_rows(&[row("hero", "subtitle", "Chez nous")]);

        assert_eq!(map.get("hero", "missing", "fallback"), "fallback");
        assert_eq!(map.get("footer", "subtitle", "fallback"), "fallback");
        assert_eq!(ContentMap::new().get("", "", ""), "");
    }

    #[test]
    fn test_stored_empty_value_is_returned() {
        let map = ContentMap::from_rows(&[row("hero", "subtitle", "")]);
        assert_eq!(map.get("hero", "subtitle", "fallback"), "");
    }

    #[test]
    fn test_last_duplicate_wins() {
        let rows = vec![row("hero", "subtitle", "old"), row("hero", "subtitle", "new")];
        assert_eq!(ContentMap::from_rows(&rows).get("hero", "subtitle", ""), "new");
    }

    #[test]
    fn test_catalogue_defaults() {
        assert_eq!(default_content("services", "title"), "Nos Prestations");
        assert_eq!(default_content("hero", "title_line2"), "notre signature");
        assert_eq!(default_content("nowhere", "title"), "");
        assert_eq!(
            content_field("hero", "subtitle").map(|f| f.kind),
            Some(FieldKind::Textarea)
        );
    }
}
