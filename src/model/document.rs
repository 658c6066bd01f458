//! Root document - the entire persisted state.
//!
//! The document is a versioned envelope around a list of inventory sets,
//! exactly one of which is active at a time. The persistence layer owns
//! serialization, migration, and validation of this shape; nothing else
//! touches the stored bytes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::household::HouseholdConfig;
use super::item::InventoryItem;
use super::kit::{BUILTIN_KIT_ID, KitItem};

/// Schema version written by this build. Documents at lower versions are
/// migrated on load; higher versions are refused.
pub const CURRENT_SCHEMA_VERSION: u32 = 3;

/// Well-known id of the default inventory set.
pub const DEFAULT_SET_ID: &str = "default";

/// UI theme preference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Follow the platform preference
    #[default]
    System,
    /// Always light
    Light,
    /// Always dark
    Dark,
}

/// Per-set user settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetSettings {
    /// Display language code, e.g. "en"
    pub language: String,
    /// UI theme preference
    #[serde(default)]
    pub theme: Theme,
    /// Children's share of an adult requirement, in percent (0-100).
    /// Unset means the engine default applies.
    #[serde(default)]
    pub children_requirement_percentage: Option<f64>,
    /// Id of the kit whose definitions drive recommendations
    pub selected_kit_id: String,
}

impl Default for SetSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            theme: Theme::System,
            children_requirement_percentage: None,
            selected_kit_id: BUILTIN_KIT_ID.to_string(),
        }
    }
}

/// An isolated partition of items, categories, household config, and
/// settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySet {
    /// Unique id within the document
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Household composition for this set
    pub household: HouseholdConfig,
    /// User settings for this set
    pub settings: SetSettings,
    /// Tracked items
    #[serde(default)]
    pub items: Vec<InventoryItem>,
    /// Categories, predefined plus custom
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Kit items from a user-uploaded kit, selected via `selected_kit_id`
    #[serde(default)]
    pub custom_templates: Vec<KitItem>,
    /// Ids of categories soft-hidden from the UI
    #[serde(default)]
    pub disabled_categories: Vec<String>,
    /// Ids of kit items excluded from recommendations
    #[serde(default)]
    pub disabled_recommended_items: Vec<String>,
    /// Ids of alerts the user dismissed
    #[serde(default)]
    pub dismissed_alert_ids: Vec<String>,
}

impl InventorySet {
    /// Creates an empty set with the standard categories and default
    /// household and settings.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            household: HouseholdConfig::default(),
            settings: SetSettings::default(),
            items: Vec::new(),
            categories: Category::standard_set(),
            custom_templates: Vec::new(),
            disabled_categories: Vec::new(),
            disabled_recommended_items: Vec::new(),
            dismissed_alert_ids: Vec::new(),
        }
    }

    /// Finds an item by id.
    #[must_use]
    pub fn item(&self, item_id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Finds an item by id, mutably.
    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut InventoryItem> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }

    /// Finds a category by id.
    #[must_use]
    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }
}

/// The entire persisted state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    /// Schema version of this document
    pub version: u32,
    /// All inventory sets; never empty after load
    pub inventory_sets: Vec<InventorySet>,
    /// Id of the active set; always resolvable after load
    pub active_inventory_set_id: String,
    /// Stamped on every save
    pub last_modified: DateTime<Utc>,
    /// When the user last exported a backup
    #[serde(default)]
    pub last_backup_date: Option<DateTime<Utc>>,
    /// The backup reminder stays quiet until this date
    #[serde(default)]
    pub backup_reminder_dismissed_until: Option<NaiveDate>,
}

impl AppData {
    /// Synthesizes the default document: one default inventory set,
    /// default household, default settings.
    #[must_use]
    pub fn default_document(now: DateTime<Utc>) -> Self {
        Self {
            version: CURRENT_SCHEMA_VERSION,
            inventory_sets: vec![InventorySet::new(DEFAULT_SET_ID, "My supplies")],
            active_inventory_set_id: DEFAULT_SET_ID.to_string(),
            last_modified: now,
            last_backup_date: None,
            backup_reminder_dismissed_until: None,
        }
    }

    /// Whether a set with the given id exists.
    #[must_use]
    pub fn set_exists(&self, set_id: &str) -> bool {
        self.inventory_sets.iter().any(|s| s.id == set_id)
    }

    /// The set the active pointer names, if it resolves.
    #[must_use]
    pub fn active_set(&self) -> Option<&InventorySet> {
        self.inventory_sets
            .iter()
            .find(|s| s.id == self.active_inventory_set_id)
    }

    /// Mutable access to the set the active pointer names.
    pub fn active_set_mut(&mut self) -> Option<&mut InventorySet> {
        let id = self.active_inventory_set_id.clone();
        self.inventory_sets.iter_mut().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn default_document_has_one_active_default_set() {
        let data = AppData::default_document(Utc::now());
        assert_eq!(data.version, CURRENT_SCHEMA_VERSION);
        assert_eq!(data.inventory_sets.len(), 1);
        assert_eq!(data.active_inventory_set_id, DEFAULT_SET_ID);
        assert!(data.active_set().is_some());
        assert!(!data.inventory_sets[0].categories.is_empty());
    }

    #[test]
    fn document_round_trips_through_camel_case_json() {
        let data = AppData::default_document(Utc::now());
        let raw = serde_json::to_string(&data).unwrap();
        assert!(raw.contains("\"inventorySets\""));
        assert!(raw.contains("\"activeInventorySetId\""));
        assert!(raw.contains("\"lastModified\""));

        let back: AppData = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn active_set_is_none_for_dangling_pointer() {
        let mut data = AppData::default_document(Utc::now());
        data.active_inventory_set_id = "gone".to_string();
        assert!(data.active_set().is_none());
    }
}
