//! Shared test utilities for `PantryBuddy`.
//!
//! This module provides common helper functions for building test
//! documents and entities with sensible defaults.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeMap;

use crate::model::{
    HouseholdConfig, InventoryItem, InventorySet, ItemType, KitItem, QuantityBasis, Unit,
};
use crate::store::{DataStore, MemoryBackend};

/// Fixed timestamp so item fixtures compare deterministically.
pub fn test_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap()
}

/// Creates a custom item with sensible defaults.
///
/// # Defaults
/// * `unit`: pieces
/// * no expiration date, no override, no rotation flags
pub fn test_item(name: &str, category_id: &str, quantity: f64) -> InventoryItem {
    InventoryItem {
        id: format!("item-{name}"),
        name: name.to_string(),
        category_id: category_id.to_string(),
        quantity,
        unit: Unit::Pieces,
        expiration_date: None,
        never_expires: false,
        recommended_quantity: None,
        location: None,
        is_normal_rotation: false,
        estimated_quantity: None,
        exclude_from_calculations: false,
        marked_as_enough: false,
        item_type: ItemType::Custom,
        template_id: None,
        created_at: test_time(),
        updated_at: test_time(),
    }
}

/// Creates a template-provenance item referencing a kit item id.
/// The stored name is the template id, as the fallback path would leave it.
pub fn template_item(template_id: &str, category_id: &str, quantity: f64) -> InventoryItem {
    let mut item = test_item(template_id, category_id, quantity);
    item.id = format!("item-from-{template_id}");
    item.item_type = ItemType::Template;
    item.template_id = Some(template_id.to_string());
    item
}

/// Creates a rotation item (tracked by estimate) in the food category.
pub fn rotation_item(name: &str, estimated_quantity: Option<f64>) -> InventoryItem {
    let mut item = test_item(name, "food", 0.0);
    item.is_normal_rotation = true;
    item.estimated_quantity = estimated_quantity;
    item
}

/// Creates a household with the given composition and no pets.
pub fn test_household(adults: u32, children: u32, supply_duration_days: u32) -> HouseholdConfig {
    HouseholdConfig {
        adults,
        children,
        supply_duration_days,
        freezer_available: false,
        pets: BTreeMap::new(),
    }
}

/// Creates a kit item definition with empty names.
pub fn kit_def(id: &str, category_id: &str, quantity: f64, basis: QuantityBasis) -> KitItem {
    KitItem {
        id: id.to_string(),
        category_id: category_id.to_string(),
        unit: Unit::Pieces,
        quantity,
        basis,
        names: BTreeMap::new(),
    }
}

/// Creates an empty inventory set with default household and settings.
pub fn test_set() -> InventorySet {
    InventorySet::new("test-set", "Test set")
}

/// Opens a store over empty in-memory storage.
/// This is the standard setup for persistence tests.
pub fn open_memory_store() -> DataStore<MemoryBackend> {
    DataStore::open(MemoryBackend::new()).unwrap()
}
