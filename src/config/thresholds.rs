//! Alert tuning constants.
//!
//! The exact numbers are product decisions, so they live in configuration
//! rather than at call sites. `config.toml` may override any of them.

use serde::{Deserialize, Serialize};

/// Thresholds consumed by the alert and water calculations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Items expiring within this many days get an "expiring soon" warning
    #[serde(default = "default_expiring_soon_days")]
    pub expiring_soon_days: i64,
    /// Category stock below this percent of recommended warns "running low"
    #[serde(default = "default_low_stock_percent")]
    pub low_stock_percent: f64,
    /// Category stock below this percent of recommended is critical
    #[serde(default = "default_critically_low_percent")]
    pub critically_low_percent: f64,
    /// Drinking-water requirement per (scaled) person per day, in liters
    #[serde(default = "default_water_liters_per_person_per_day")]
    pub water_liters_per_person_per_day: f64,
}

const fn default_expiring_soon_days() -> i64 {
    30
}

const fn default_low_stock_percent() -> f64 {
    60.0
}

const fn default_critically_low_percent() -> f64 {
    30.0
}

const fn default_water_liters_per_person_per_day() -> f64 {
    3.0
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            expiring_soon_days: default_expiring_soon_days(),
            low_stock_percent: default_low_stock_percent(),
            critically_low_percent: default_critically_low_percent(),
            water_liters_per_person_per_day: default_water_liters_per_person_per_day(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn defaults_order_low_above_critical() {
        let thresholds = AlertThresholds::default();
        assert!(thresholds.low_stock_percent > thresholds.critically_low_percent);
        assert!(thresholds.expiring_soon_days > 0);
        assert!(thresholds.water_liters_per_person_per_day > 0.0);
    }

    #[test]
    fn partial_toml_fills_remaining_fields_with_defaults() {
        let parsed: AlertThresholds = toml::from_str("expiring_soon_days = 14").unwrap();
        assert_eq!(parsed.expiring_soon_days, 14);
        assert_eq!(parsed.low_stock_percent, 60.0);
        assert_eq!(parsed.critically_low_percent, 30.0);
    }
}
