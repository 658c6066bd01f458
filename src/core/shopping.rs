//! Shopping-list derivation.
//!
//! Collects items whose effective quantity is below their recommended
//! quantity, grouped by category, and renders the plain-text export
//! format.

use crate::model::{Category, HouseholdConfig, InventoryItem, ItemType, KitItem, Unit};

use super::recommend::recommended_quantity_for_item;

/// One line of the shopping list.
#[derive(Clone, Debug, PartialEq)]
pub struct ShoppingEntry {
    /// Resolved display name
    pub item_name: String,
    /// Quantity still missing (recommended minus effective)
    pub needed: f64,
    /// Effective quantity currently on hand
    pub current: f64,
    /// Recommended quantity
    pub recommended: f64,
    /// Unit of measure
    pub unit: Unit,
}

/// Entries for one category.
#[derive(Clone, Debug, PartialEq)]
pub struct ShoppingGroup {
    /// Category display name
    pub category_name: String,
    /// Entries in item order
    pub entries: Vec<ShoppingEntry>,
}

/// The derived shopping list, grouped by category.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShoppingList {
    /// Groups in category listing order
    pub groups: Vec<ShoppingGroup>,
}

impl ShoppingList {
    /// Total number of entries across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Builds the shopping list for a set of items.
///
/// Items marked as enough, rotation items excluded from calculations, and
/// items already at or above their recommendation are skipped.
#[must_use]
pub fn build_shopping_list(
    items: &[InventoryItem],
    categories: &[Category],
    household: &HouseholdConfig,
    recommended: &[KitItem],
    children_multiplier: f64,
    language: &str,
    translate: &dyn Fn(&str) -> String,
) -> ShoppingList {
    let mut groups: Vec<ShoppingGroup> = Vec::new();

    let mut category_order: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();
    for item in items {
        if !category_order.contains(&item.category_id.as_str()) {
            category_order.push(item.category_id.as_str());
        }
    }

    for category_id in category_order {
        let mut entries = Vec::new();
        for item in items.iter().filter(|i| i.category_id == category_id) {
            if item.marked_as_enough
                || (item.is_normal_rotation && item.exclude_from_calculations)
            {
                continue;
            }

            let target =
                recommended_quantity_for_item(item, household, recommended, children_multiplier);
            let current = item.effective_quantity();
            if current >= target {
                continue;
            }

            let item_name = if item.item_type == ItemType::Template {
                match item.template_id.as_deref().map(translate) {
                    Some(translated)
                        if Some(translated.as_str()) != item.template_id.as_deref() =>
                    {
                        translated
                    }
                    _ => item.name.clone(),
                }
            } else {
                item.name.clone()
            };

            entries.push(ShoppingEntry {
                item_name,
                needed: target - current,
                current,
                recommended: target,
                unit: item.unit,
            });
        }

        if !entries.is_empty() {
            let category_name = categories
                .iter()
                .find(|c| c.id == category_id)
                .map_or_else(|| category_id.to_string(), |c| c.display_name(language));
            groups.push(ShoppingGroup {
                category_name,
                entries,
            });
        }
    }

    ShoppingList { groups }
}

/// Quantities are fractional; show one decimal only when needed.
fn format_quantity(quantity: f64) -> String {
    if (quantity - quantity.round()).abs() < 1e-9 {
        format!("{quantity:.0}")
    } else {
        format!("{quantity:.1}")
    }
}

/// Renders the plain-text export body.
#[must_use]
pub fn format_shopping_list(list: &ShoppingList) -> String {
    use std::fmt::Write;

    if list.is_empty() {
        return "Shopping list\n\nEverything is stocked up.\n".to_string();
    }

    let mut out = String::from("Shopping list\n");
    for group in &list.groups {
        // write! to a String is infallible
        let _ = write!(out, "\n{}\n", group.category_name);
        for entry in &group.entries {
            let _ = writeln!(
                out,
                "- {}: need {} {} (have {}, recommended {})",
                entry.item_name,
                format_quantity(entry.needed),
                entry.unit,
                format_quantity(entry.current),
                format_quantity(entry.recommended),
            );
        }
    }
    out
}
