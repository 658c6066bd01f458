//! Inventory item entity - Represents one tracked supply unit.
//!
//! Items carry both a raw stored `quantity` and an *effective* quantity used
//! by the calculation engines. The two are deliberately decoupled for
//! rotation items (consumables tracked by rough estimate rather than exact
//! count).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Unit of measure for an item's quantity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Discrete pieces
    #[default]
    Pieces,
    /// Liters (water and other fluids)
    Liters,
    /// Kilograms
    Kilograms,
    /// Grams
    Grams,
    /// Cans
    Cans,
    /// Packs
    Packs,
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pieces => "pcs",
            Self::Liters => "l",
            Self::Kilograms => "kg",
            Self::Grams => "g",
            Self::Cans => "cans",
            Self::Packs => "packs",
        };
        write!(f, "{label}")
    }
}

/// Provenance of an item: created from a built-in template or by hand
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// References a kit item via `template_id`
    Template,
    /// Free-form user entry
    #[default]
    Custom,
}

/// Inventory item model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Unique identifier within the inventory set (uuid for custom items)
    pub id: String,
    /// Human-readable name, e.g. "Canned beans"
    pub name: String,
    /// Id of the category this item belongs to
    pub category_id: String,
    /// On-hand quantity; non-negative, may be fractional
    pub quantity: f64,
    /// Unit of measure for `quantity`
    pub unit: Unit,
    /// Expiration date, if the item expires
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    /// Set for durable goods; suppresses all expiration alerts
    #[serde(default)]
    pub never_expires: bool,
    /// User override for the recommended quantity; always wins over kit math
    #[serde(default)]
    pub recommended_quantity: Option<f64>,
    /// Free-text storage location, e.g. "basement shelf"
    #[serde(default)]
    pub location: Option<String>,
    /// Rotation item: consumed and restocked continuously, tracked by estimate
    #[serde(default)]
    pub is_normal_rotation: bool,
    /// Rough on-hand estimate for rotation items
    #[serde(default)]
    pub estimated_quantity: Option<f64>,
    /// Rotation item opted out of all calculations
    #[serde(default)]
    pub exclude_from_calculations: bool,
    /// User declared the current amount sufficient; suppresses restock pressure
    #[serde(default)]
    pub marked_as_enough: bool,
    /// Whether the item came from a template or was entered by hand
    #[serde(default)]
    pub item_type: ItemType,
    /// Kit item id this was created from, when `item_type` is `Template`
    #[serde(default)]
    pub template_id: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// The quantity the calculation engines actually use.
    ///
    /// Ordinary items contribute their raw `quantity`. Rotation items
    /// contribute their `estimated_quantity` (0 when absent), and 0
    /// unconditionally when `exclude_from_calculations` is set.
    #[must_use]
    pub fn effective_quantity(&self) -> f64 {
        if self.is_normal_rotation {
            if self.exclude_from_calculations {
                0.0
            } else {
                self.estimated_quantity.unwrap_or(0.0)
            }
        } else {
            self.quantity
        }
    }

    /// Stamps `updated_at` after a mutation.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use crate::test_utils::{rotation_item, test_item};

    #[test]
    fn effective_quantity_ordinary_item_is_raw_quantity() {
        let item = test_item("beans", "food", 4.0);
        assert_eq!(item.effective_quantity(), 4.0);
    }

    #[test]
    fn effective_quantity_rotation_uses_estimate_over_quantity() {
        let mut item = rotation_item("milk", Some(5.0));
        item.quantity = 3.0;
        assert_eq!(item.effective_quantity(), 5.0);
    }

    #[test]
    fn effective_quantity_rotation_without_estimate_is_zero() {
        let item = rotation_item("milk", None);
        assert_eq!(item.effective_quantity(), 0.0);
    }

    #[test]
    fn effective_quantity_excluded_rotation_is_zero() {
        let mut item = rotation_item("milk", Some(5.0));
        item.exclude_from_calculations = true;
        assert_eq!(item.effective_quantity(), 0.0);
    }

    #[test]
    fn touch_updates_only_the_update_timestamp() {
        let mut item = test_item("beans", "food", 1.0);
        let created = item.created_at;
        let later = created + chrono::Duration::hours(2);
        item.touch(later);
        assert_eq!(item.created_at, created);
        assert_eq!(item.updated_at, later);
    }
}
