//! Mapping from DOM anchor ids to logical section keys.

use serde::{Deserialize, Serialize};

/// One trackable section: the anchor id on the page and the key its nav
/// link carries in `data-section`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    pub id: String,
    pub key: String,
}

impl SectionEntry {
    pub fn new(id: &str, key: &str) -> Self {
        Self {
            id: id.to_string(),
            key: key.to_string(),
        }
    }
}

/// The portfolio layout: anchor ids in document order with their keys.
pub fn default_sections() -> Vec<SectionEntry> {
    [
        ("home", "home"),
        ("about", "about"),
        ("research", "projects"),
        ("publications", "publications"),
        ("achievements", "achievements"),
        ("skills", "skills"),
        ("leadership-preview", "leadership"),
        ("courses", "courses"),
        ("contact", "contact"),
    ]
    .into_iter()
    .map(|(id, key)| SectionEntry::new(id, key))
    .collect()
}

/// Ordered anchor-id → key table.
///
/// Order matters: passive tracking visits sections in this order and keeps
/// the first one on distance ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMap {
    entries: Vec<SectionEntry>,
}

impl SectionMap {
    pub fn new(entries: Vec<SectionEntry>) -> Self {
        Self { entries }
    }

    /// Key for an anchor id. Ids are matched exactly, like `getElementById`.
    pub fn key_for(&self, anchor: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.id == anchor)
            .map(|entry| entry.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SectionMap {
    fn default() -> Self {
        Self::new(default_sections())
    }
}
