//! Persisted document types.
//!
//! Everything in this module serializes into the single JSON document the
//! store owns. Field names use camelCase on the wire; that shape is the
//! contract between the persistence layer and its accessors.

/// Category entity - classification buckets for supplies
pub mod category;
/// Root document - inventory sets, settings, and bookkeeping
pub mod document;
/// Household composition driving recommended quantities
pub mod household;
/// Inventory item entity - one tracked supply unit
pub mod item;
/// Kits - bundles of recommended-item definitions
pub mod kit;

pub use category::Category;
pub use document::{
    AppData, CURRENT_SCHEMA_VERSION, DEFAULT_SET_ID, InventorySet, SetSettings, Theme,
};
pub use household::HouseholdConfig;
pub use item::{InventoryItem, ItemType, Unit};
pub use kit::{BUILTIN_KIT_ID, Kit, KitItem, QuantityBasis, builtin_kit};
