use crate::domain::model::{CatalogEntry, ZoneId};

/// Fixed, ordered registry of the zones the demo renders. Shared and
/// immutable for the life of the process.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// The zone set the original demo ships with.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                CatalogEntry::new("America/New_York", "New York", "\u{1F1FA}\u{1F1F8}", "EST/EDT"),
                CatalogEntry::new("America/Los_Angeles", "Los Angeles", "\u{1F1FA}\u{1F1F8}", "PST/PDT"),
                CatalogEntry::new("America/Chicago", "Chicago", "\u{1F1FA}\u{1F1F8}", "CST/CDT"),
                CatalogEntry::new("America/Denver", "Denver", "\u{1F1FA}\u{1F1F8}", "MST/MDT"),
                CatalogEntry::new("Europe/London", "London", "\u{1F1EC}\u{1F1E7}", "GMT/BST"),
                CatalogEntry::new("Europe/Paris", "Paris", "\u{1F1EB}\u{1F1F7}", "CET/CEST"),
                CatalogEntry::new("Europe/Berlin", "Berlin", "\u{1F1E9}\u{1F1EA}", "CET/CEST"),
                CatalogEntry::new("Europe/Rome", "Rome", "\u{1F1EE}\u{1F1F9}", "CET/CEST"),
                CatalogEntry::new("Asia/Tokyo", "Tokyo", "\u{1F1EF}\u{1F1F5}", "JST"),
                CatalogEntry::new("Asia/Singapore", "Singapore", "\u{1F1F8}\u{1F1EC}", "SGT"),
                CatalogEntry::new("Asia/Dubai", "Dubai", "\u{1F1E6}\u{1F1EA}", "GST"),
                CatalogEntry::new("Australia/Sydney", "Sydney", "\u{1F1E6}\u{1F1FA}", "AEST/AEDT"),
                CatalogEntry::new("America/Sao_Paulo", "S\u{e3}o Paulo", "\u{1F1E7}\u{1F1F7}", "BRT/BRST"),
                CatalogEntry::new("Africa/Cairo", "Cairo", "\u{1F1EA}\u{1F1EC}", "EET/EEST"),
            ],
        }
    }

    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Ordered, fixed sequence of entries.
    pub fn list(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// A miss is "unknown timezone", a reportable condition the caller
    /// handles; it is not a crash.
    pub fn lookup(&self, zone: &ZoneId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| &e.zone == zone)
    }

    pub fn zones(&self) -> Vec<ZoneId> {
        self.entries.iter().map(|e| e.zone.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
