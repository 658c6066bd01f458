//! Household composition driving recommended-quantity math.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Household configuration, one per inventory set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdConfig {
    /// Number of adults
    pub adults: u32,
    /// Number of children
    pub children: u32,
    /// How many days of supplies the household is stocking for
    pub supply_duration_days: u32,
    /// Whether a freezer is available for storage
    #[serde(default)]
    pub freezer_available: bool,
    /// Pet counts keyed by species, e.g. {"dog": 1}
    #[serde(default)]
    pub pets: BTreeMap<String, u32>,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            supply_duration_days: 10,
            freezer_available: false,
            pets: BTreeMap::new(),
        }
    }
}

impl HouseholdConfig {
    /// Household size scaled for recommendation math: adults count fully,
    /// children by the given fractional multiplier.
    #[must_use]
    pub fn scaled_size(&self, children_multiplier: f64) -> f64 {
        f64::from(self.adults) + f64::from(self.children) * children_multiplier
    }
}
