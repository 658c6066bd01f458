//! Recommended-quantity engine.
//!
//! Computes the target quantity for an item from household composition,
//! the selected kit's definitions, and user overrides. Pure functions;
//! out-of-range data yields documented fallbacks, never errors.

use crate::config::AlertThresholds;
use crate::model::{
    BUILTIN_KIT_ID, HouseholdConfig, InventoryItem, InventorySet, Kit, KitItem, QuantityBasis,
    SetSettings,
};

/// Children's share of an adult requirement when the user has not
/// configured one.
pub const DEFAULT_CHILDREN_MULTIPLIER: f64 = 0.5;

/// Target quantity for items with neither an override nor a kit match.
pub const FALLBACK_RECOMMENDED_QUANTITY: f64 = 0.0;

/// Category id whose items count toward the water supply.
pub const WATER_CATEGORY_ID: &str = "water";

/// Resolves the children multiplier from user settings, falling back to
/// [`DEFAULT_CHILDREN_MULTIPLIER`].
#[must_use]
pub fn children_multiplier(settings: &SetSettings) -> f64 {
    settings
        .children_requirement_percentage
        .map_or(DEFAULT_CHILDREN_MULTIPLIER, |pct| pct / 100.0)
}

/// The kit items currently driving recommendations for a set.
///
/// The selected kit wins wholesale: the built-in kit id resolves to the
/// embedded bundle, anything else to the set's uploaded definitions.
/// Definitions the user disabled are filtered out either way.
#[must_use]
pub fn active_recommended_items(set: &InventorySet, builtin: &Kit) -> Vec<KitItem> {
    let source: &[KitItem] = if set.settings.selected_kit_id == BUILTIN_KIT_ID {
        &builtin.items
    } else {
        &set.custom_templates
    };

    source
        .iter()
        .filter(|def| !set.disabled_recommended_items.contains(&def.id))
        .cloned()
        .collect()
}

/// Computes the target quantity for a single item.
///
/// An explicit `recommended_quantity` override always wins, regardless of
/// household size. Otherwise the item's kit definition is located via its
/// template reference and scaled to the household; items with no kit
/// match fall back to [`FALLBACK_RECOMMENDED_QUANTITY`]. The result is
/// never negative, and a zero-person household yields zero.
#[must_use]
pub fn recommended_quantity_for_item(
    item: &InventoryItem,
    household: &HouseholdConfig,
    recommended: &[KitItem],
    children_multiplier: f64,
) -> f64 {
    if let Some(override_quantity) = item.recommended_quantity {
        return override_quantity;
    }

    let Some(def) = item
        .template_id
        .as_deref()
        .and_then(|template_id| recommended.iter().find(|d| d.id == template_id))
    else {
        return FALLBACK_RECOMMENDED_QUANTITY;
    };

    let scaled_size = household.scaled_size(children_multiplier);
    let target = match def.basis {
        QuantityBasis::PerPersonPerDay => {
            def.quantity * scaled_size * f64::from(household.supply_duration_days)
        }
        QuantityBasis::PerPerson => def.quantity * scaled_size,
        QuantityBasis::PerHousehold => def.quantity,
    };

    target.max(0.0)
}

/// Outcome of the water supply check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterReport {
    /// Liters the household should have on hand
    pub required_liters: f64,
    /// Effective liters currently on hand across water items
    pub available_liters: f64,
    /// Requirement minus available, floored at zero
    pub shortfall_liters: f64,
    /// Whether the available amount covers the requirement
    pub has_enough: bool,
}

/// Sums effective water-item quantities against the household-size-driven
/// requirement.
#[must_use]
pub fn calculate_water_requirements(
    items: &[InventoryItem],
    household: &HouseholdConfig,
    children_multiplier: f64,
    thresholds: &AlertThresholds,
) -> WaterReport {
    let required_liters = household.scaled_size(children_multiplier)
        * thresholds.water_liters_per_person_per_day
        * f64::from(household.supply_duration_days);

    let available_liters: f64 = items
        .iter()
        .filter(|item| item.category_id == WATER_CATEGORY_ID)
        .map(InventoryItem::effective_quantity)
        .sum();

    let shortfall_liters = (required_liters - available_liters).max(0.0);

    WaterReport {
        required_liters,
        available_liters,
        shortfall_liters,
        has_enough: shortfall_liters <= 0.0,
    }
}
