//! Category entity - classification buckets for supplies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A classification bucket for inventory items.
///
/// The predefined categories ship with every new inventory set; users can
/// add custom ones. Custom categories still referenced by items are
/// disabled (soft-hidden via the set's disabled list) rather than deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique id within the inventory set, e.g. "water"
    pub id: String,
    /// Localized display names keyed by language code
    pub names: BTreeMap<String, String>,
    /// Icon identifier for the presentation layer
    #[serde(default)]
    pub icon: String,
    /// Position in category listings, ascending
    #[serde(default)]
    pub sort_order: u32,
    /// Whether the user created this category
    #[serde(default)]
    pub custom: bool,
}

impl Category {
    /// Display name in the given language, falling back to English and
    /// finally the id.
    #[must_use]
    pub fn display_name(&self, language: &str) -> String {
        self.names
            .get(language)
            .or_else(|| self.names.get("en"))
            .cloned()
            .unwrap_or_else(|| self.id.clone())
    }

    /// The predefined categories seeded into every new inventory set.
    #[must_use]
    pub fn standard_set() -> Vec<Self> {
        let defs: [(&str, &str, &str, &str); 6] = [
            ("water", "Water", "Wasser", "droplet"),
            ("food", "Food", "Lebensmittel", "utensils"),
            ("medical", "Medical", "Medikamente", "cross"),
            ("hygiene", "Hygiene", "Hygiene", "soap"),
            ("tools", "Tools & Equipment", "Werkzeug", "wrench"),
            ("documents", "Documents", "Dokumente", "folder"),
        ];

        defs.iter()
            .enumerate()
            .map(|(i, (id, en, de, icon))| Self {
                id: (*id).to_string(),
                names: BTreeMap::from([
                    ("en".to_string(), (*en).to_string()),
                    ("de".to_string(), (*de).to_string()),
                ]),
                icon: (*icon).to_string(),
                sort_order: u32::try_from(i).unwrap_or(u32::MAX),
                custom: false,
            })
            .collect()
    }
}
