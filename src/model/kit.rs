//! Kits - named bundles of recommended-item definitions.
//!
//! A kit item describes a standard supply and the rule for scaling its
//! baseline quantity to a household. Exactly one kit is selected per
//! inventory set at a time; selecting a kit replaces the active
//! recommendation set wholesale.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::item::Unit;

/// Id of the kit compiled into the binary.
pub const BUILTIN_KIT_ID: &str = "household-basic";

const BUILTIN_KIT_JSON: &str = include_str!("../../kits/household-basic.json");

/// How a kit item's baseline quantity scales to a household.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuantityBasis {
    /// Quantity × scaled household size × supply days (e.g. water, food)
    PerPersonPerDay,
    /// Quantity × scaled household size (e.g. candles, soap)
    PerPerson,
    /// Fixed quantity regardless of household size (e.g. one radio)
    PerHousehold,
}

/// One recommended-item definition inside a kit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitItem {
    /// Stable id; inventory items reference it via `template_id`
    pub id: String,
    /// Category the item belongs to
    pub category_id: String,
    /// Unit of measure for the baseline quantity
    pub unit: Unit,
    /// Baseline quantity, interpreted per `basis`
    pub quantity: f64,
    /// Scaling rule for the baseline quantity
    pub basis: QuantityBasis,
    /// Localized display names keyed by language code
    #[serde(default)]
    pub names: BTreeMap<String, String>,
}

impl KitItem {
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
}

/// A named bundle of recommended-item definitions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kit {
    /// Unique kit id, e.g. "household-basic"
    pub id: String,
    /// Human-readable kit name
    pub name: String,
    /// The recommended-item definitions this kit carries
    pub items: Vec<KitItem>,
}

impl Kit {
    /// Parses a kit from raw JSON, rejecting structurally broken bundles.
    ///
    /// # Errors
    /// Returns an error when the JSON does not parse, when item ids
    /// collide, or when a baseline quantity is negative.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let kit: Self = serde_json::from_str(raw)?;

        if kit.id.trim().is_empty() {
            return Err(Error::Config {
                message: "Kit id cannot be empty".to_string(),
            });
        }

        let mut seen = std::collections::BTreeSet::new();
        for item in &kit.items {
            if !seen.insert(item.id.as_str()) {
                return Err(Error::Config {
                    message: format!("Duplicate kit item id: {}", item.id),
                });
            }
            if item.quantity < 0.0 {
                return Err(Error::Config {
                    message: format!("Kit item {} has a negative quantity", item.id),
                });
            }
        }

        Ok(kit)
    }
}

/// Loads the kit compiled into the binary.
///
/// # Errors
/// Returns an error if the embedded bundle is malformed; that indicates a
/// packaging defect, not a user condition.
pub fn builtin_kit() -> Result<Kit> {
    Kit::from_json_str(BUILTIN_KIT_JSON)
}
