//! Alert derivation.
//!
//! Produces a prioritized list of alerts from current inventory, household
//! config, and an injected translation function. Alerts are recomputed
//! fresh on every call; only their dismissal ids are persisted. The engine
//! never fails: missing or partial inputs simply yield fewer alerts.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::config::AlertThresholds;
use crate::core::recommend::{calculate_water_requirements, recommended_quantity_for_item};
use crate::model::{Category, HouseholdConfig, InventoryItem, ItemType, KitItem};

/// Alert priority, most urgent first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Needs attention now (expired, out of stock)
    Critical,
    /// Needs attention soon (expiring, running low)
    Warning,
    /// Informational
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        };
        write!(f, "{label}")
    }
}

/// One derived alert. Flat record, no sub-states.
#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    /// Stable id used for dismissal bookkeeping
    pub id: String,
    /// Alert priority
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Resolved display name of the item concerned, when item-scoped
    pub item_name: Option<String>,
}

/// Everything the alert engine consumes. The translation function maps a
/// template id to a display name and returns its argument verbatim when it
/// has no translation.
pub struct AlertInputs<'a> {
    /// Items of the active inventory set
    pub items: &'a [InventoryItem],
    /// Categories of the active inventory set
    pub categories: &'a [Category],
    /// Household config; absent simply suppresses the water check
    pub household: Option<&'a HouseholdConfig>,
    /// Active recommended-item definitions
    pub recommended: &'a [KitItem],
    /// Resolved children multiplier
    pub children_multiplier: f64,
    /// Alert tuning constants
    pub thresholds: &'a AlertThresholds,
    /// Reference date for expiration math
    pub today: NaiveDate,
    /// Language for category display names
    pub language: &'a str,
    /// Injected name translation
    pub translate: &'a dyn Fn(&str) -> String,
}

/// Builds a translation function over kit definitions for a language.
/// Unknown keys come back verbatim.
pub fn kit_translator<'a>(
    defs: &'a [KitItem],
    language: &'a str,
) -> impl Fn(&str) -> String + 'a {
    move |key: &str| {
        defs.iter()
            .find(|def| def.id == key)
            .map_or_else(|| key.to_string(), |def| def.display_name(language))
    }
}

/// Resolved display name for an item: template items go through the
/// translation, falling back to the stored name when the translation
/// comes back verbatim; custom items always use the stored name.
fn resolve_item_name(item: &InventoryItem, translate: &dyn Fn(&str) -> String) -> String {
    if item.item_type == ItemType::Template {
        if let Some(template_id) = item.template_id.as_deref() {
            let translated = translate(template_id);
            if translated != template_id {
                return translated;
            }
        }
    }
    item.name.clone()
}

/// Rotation items opted out of calculations take no part in stock math.
fn participates(item: &InventoryItem) -> bool {
    !(item.is_normal_rotation && item.exclude_from_calculations)
}

/// Derives the full prioritized alert list.
///
/// Stages run in a fixed order (expiration, category stock, water), then
/// the concatenation is stably sorted by severity.
#[must_use]
pub fn generate_alerts(inputs: &AlertInputs<'_>) -> Vec<Alert> {
    let mut alerts = Vec::new();

    expiration_alerts(inputs, &mut alerts);
    category_stock_alerts(inputs, &mut alerts);
    water_alert(inputs, &mut alerts);

    alerts.sort_by_key(|a| a.severity);
    alerts
}

fn expiration_alerts(inputs: &AlertInputs<'_>, alerts: &mut Vec<Alert>) {
    for item in inputs.items {
        if item.never_expires {
            continue;
        }
        let Some(expiration) = item.expiration_date else {
            continue;
        };

        let days_left = (expiration - inputs.today).num_days();
        let name = resolve_item_name(item, inputs.translate);

        if days_left < 0 {
            alerts.push(Alert {
                id: format!("expired:{}", item.id),
                severity: Severity::Critical,
                message: format!("{name} has expired"),
                item_name: Some(name),
            });
        } else if days_left <= inputs.thresholds.expiring_soon_days {
            let message = match days_left {
                0 => format!("{name} expires today"),
                1 => format!("{name} expires in 1 day"),
                n => format!("{name} expires in {n} days"),
            };
            alerts.push(Alert {
                id: format!("expiring:{}", item.id),
                severity: Severity::Warning,
                message,
                item_name: Some(name),
            });
        }
    }
}

#[derive(Default)]
struct CategoryTotals {
    quantity: f64,
    recommended: f64,
    item_count: usize,
}

/// Stock level of one category, for alerting and status display.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryStock {
    /// Category id
    pub category_id: String,
    /// Resolved category display name
    pub display_name: String,
    /// Sum of effective quantities across participating items
    pub total_quantity: f64,
    /// Sum of recommended quantities; marked-as-enough items add nothing
    pub total_recommended: f64,
    /// Quantity over recommendation in percent; 100 when nothing is
    /// recommended
    pub percent: f64,
    /// Number of participating items
    pub item_count: usize,
}

/// Per-category stock levels, in category listing order. Categories with
/// no participating items do not appear at all.
#[must_use]
pub fn category_stock_levels(inputs: &AlertInputs<'_>) -> Vec<CategoryStock> {
    // A zero household keeps explicit overrides meaningful while kit math
    // contributes nothing.
    let zero_household = HouseholdConfig {
        adults: 0,
        children: 0,
        supply_duration_days: 0,
        ..HouseholdConfig::default()
    };
    let household = inputs.household.unwrap_or(&zero_household);

    let mut totals: BTreeMap<&str, CategoryTotals> = BTreeMap::new();

    for item in inputs.items.iter().filter(|i| participates(i)) {
        let entry = totals.entry(item.category_id.as_str()).or_default();
        entry.item_count += 1;
        entry.quantity += item.effective_quantity();
        if !item.marked_as_enough {
            entry.recommended += recommended_quantity_for_item(
                item,
                household,
                inputs.recommended,
                inputs.children_multiplier,
            );
        }
    }

    // Known categories first, in their listing order, then orphans.
    let mut ordered: Vec<&str> = inputs
        .categories
        .iter()
        .map(|c| c.id.as_str())
        .filter(|id| totals.contains_key(id))
        .collect();
    for id in totals.keys() {
        if !ordered.contains(id) {
            ordered.push(*id);
        }
    }

    ordered
        .into_iter()
        .filter_map(|category_id| {
            let totals = totals.get(category_id)?;
            if totals.item_count == 0 {
                return None;
            }

            let display_name = inputs
                .categories
                .iter()
                .find(|c| c.id == category_id)
                .map_or_else(
                    || category_id.to_string(),
                    |c| c.display_name(inputs.language),
                );

            let percent = if totals.recommended <= 0.0 {
                100.0
            } else {
                totals.quantity / totals.recommended * 100.0
            };

            Some(CategoryStock {
                category_id: category_id.to_string(),
                display_name,
                total_quantity: totals.quantity,
                total_recommended: totals.recommended,
                percent,
                item_count: totals.item_count,
            })
        })
        .collect()
}

fn category_stock_alerts(inputs: &AlertInputs<'_>, alerts: &mut Vec<Alert>) {
    for stock in category_stock_levels(inputs) {
        // Cast safety: percent is a small non-negative display value.
        #[allow(clippy::cast_possible_truncation)]
        let rounded = stock.percent.round() as i64;

        if stock.total_quantity <= 0.0 {
            alerts.push(Alert {
                id: format!("stock:{}", stock.category_id),
                severity: Severity::Critical,
                message: format!("{} is out of stock", stock.display_name),
                item_name: None,
            });
        } else if stock.percent < inputs.thresholds.critically_low_percent {
            alerts.push(Alert {
                id: format!("stock:{}", stock.category_id),
                severity: Severity::Critical,
                message: format!(
                    "{} is critically low ({rounded}% of recommended)",
                    stock.display_name
                ),
                item_name: None,
            });
        } else if stock.percent < inputs.thresholds.low_stock_percent {
            alerts.push(Alert {
                id: format!("stock:{}", stock.category_id),
                severity: Severity::Warning,
                message: format!(
                    "{} is running low ({rounded}% of recommended)",
                    stock.display_name
                ),
                item_name: None,
            });
        }
    }
}

fn water_alert(inputs: &AlertInputs<'_>, alerts: &mut Vec<Alert>) {
    let Some(household) = inputs.household else {
        return;
    };

    let report = calculate_water_requirements(
        inputs.items,
        household,
        inputs.children_multiplier,
        inputs.thresholds,
    );

    if report.shortfall_liters > 0.0 {
        // Round up so a 0.01 L gap never reads as "short by 0.0 liters".
        let shortfall = (report.shortfall_liters * 10.0).ceil() / 10.0;
        alerts.push(Alert {
            id: "water".to_string(),
            severity: Severity::Warning,
            message: format!("Water supply is short by {shortfall:.1} liters"),
            item_name: None,
        });
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::model::QuantityBasis;
    use crate::test_utils::{
        kit_def, template_item, test_household, test_item,
    };
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn no_translation(key: &str) -> String {
        key.to_string()
    }

    struct Fixture {
        items: Vec<InventoryItem>,
        categories: Vec<Category>,
        household: HouseholdConfig,
        recommended: Vec<KitItem>,
        thresholds: AlertThresholds,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                items: Vec::new(),
                categories: Category::standard_set(),
                household: test_household(2, 0, 10),
                recommended: Vec::new(),
                thresholds: AlertThresholds::default(),
            }
        }

        fn alerts(&self) -> Vec<Alert> {
            let inputs = AlertInputs {
                items: &self.items,
                categories: &self.categories,
                household: Some(&self.household),
                recommended: &self.recommended,
                children_multiplier: 0.5,
                thresholds: &self.thresholds,
                today: today(),
                language: "en",
                translate: &no_translation,
            };
            generate_alerts(&inputs)
        }
    }

    #[test]
    fn empty_inventory_without_household_yields_no_alerts() {
        let fixture = Fixture::new();
        let inputs = AlertInputs {
            items: &fixture.items,
            categories: &fixture.categories,
            household: None,
            recommended: &fixture.recommended,
            children_multiplier: 0.5,
            thresholds: &fixture.thresholds,
            today: today(),
            language: "en",
            translate: &no_translation,
        };
        assert!(generate_alerts(&inputs).is_empty());
    }

    #[test]
    fn expired_item_is_critical() {
        let mut fixture = Fixture::new();
        // Plenty of water so only the expiration fires
        let mut water = test_item("Bottled water", "water", 100.0);
        water.never_expires = true;
        fixture.items.push(water);

        let mut beans = test_item("Canned beans", "food", 10.0);
        beans.expiration_date = Some(today() - chrono::Duration::days(3));
        fixture.items.push(beans);

        let alerts = fixture.alerts();
        let expired = alerts.iter().find(|a| a.id.starts_with("expired:")).unwrap();
        assert_eq!(expired.severity, Severity::Critical);
        assert_eq!(expired.message, "Canned beans has expired");
        assert_eq!(expired.item_name.as_deref(), Some("Canned beans"));
    }

    #[test]
    fn expiring_soon_item_warns_with_day_count() {
        let mut fixture = Fixture::new();
        let mut beans = test_item("Canned beans", "food", 10.0);
        beans.expiration_date = Some(today() + chrono::Duration::days(5));
        fixture.items.push(beans);

        let alerts = fixture.alerts();
        let expiring = alerts.iter().find(|a| a.id.starts_with("expiring:")).unwrap();
        assert_eq!(expiring.severity, Severity::Warning);
        assert_eq!(expiring.message, "Canned beans expires in 5 days");
    }

    #[test]
    fn far_future_never_expires_and_dateless_items_stay_silent() {
        let mut fixture = Fixture::new();

        let mut far = test_item("Rice", "food", 10.0);
        far.expiration_date = Some(today() + chrono::Duration::days(400));
        fixture.items.push(far);

        let mut durable = test_item("Rope", "tools", 1.0);
        durable.never_expires = true;
        durable.expiration_date = Some(today() - chrono::Duration::days(10));
        fixture.items.push(durable);

        fixture.items.push(test_item("Salt", "food", 1.0));

        let alerts = fixture.alerts();
        assert!(
            alerts
                .iter()
                .all(|a| !a.id.starts_with("expired:") && !a.id.starts_with("expiring:"))
        );
    }

    #[test]
    fn zero_quantity_category_with_items_is_out_of_stock() {
        let mut fixture = Fixture::new();
        fixture.items.push(test_item("Bandages", "medical", 0.0));

        let alerts = fixture.alerts();
        let stock = alerts.iter().find(|a| a.id == "stock:medical").unwrap();
        assert_eq!(stock.severity, Severity::Critical);
        assert_eq!(stock.message, "Medical is out of stock");
    }

    #[test]
    fn category_without_items_yields_no_stock_alert() {
        let fixture = Fixture::new();
        let alerts = fixture.alerts();
        assert!(alerts.iter().all(|a| !a.id.starts_with("stock:")));
    }

    #[test]
    fn category_scenario_hits_critically_low_with_rounded_percent() {
        // quantities 5 + 3 = 8 against recommended 20 + 10 = 30 -> 26.7% -> 27
        let mut fixture = Fixture::new();

        let mut first = test_item("Canned soup", "food", 5.0);
        first.recommended_quantity = Some(20.0);
        let mut second = test_item("Crackers", "food", 3.0);
        second.recommended_quantity = Some(10.0);
        fixture.items.push(first);
        fixture.items.push(second);

        let alerts = fixture.alerts();
        let stock = alerts.iter().find(|a| a.id == "stock:food").unwrap();
        assert_eq!(stock.severity, Severity::Critical);
        assert_eq!(stock.message, "Food is critically low (27% of recommended)");
    }

    #[test]
    fn running_low_band_is_a_warning() {
        let mut fixture = Fixture::new();
        let mut item = test_item("Canned soup", "food", 5.0);
        item.recommended_quantity = Some(10.0); // 50% -> between 30 and 60
        fixture.items.push(item);

        let alerts = fixture.alerts();
        let stock = alerts.iter().find(|a| a.id == "stock:food").unwrap();
        assert_eq!(stock.severity, Severity::Warning);
        assert_eq!(stock.message, "Food is running low (50% of recommended)");
    }

    #[test]
    fn zero_recommendation_counts_as_fully_stocked() {
        let mut fixture = Fixture::new();
        fixture.items.push(test_item("Homemade jam", "food", 2.0));

        let alerts = fixture.alerts();
        assert!(alerts.iter().all(|a| a.id != "stock:food"));
    }

    #[test]
    fn marked_as_enough_suppresses_restock_pressure() {
        let mut fixture = Fixture::new();
        let mut item = test_item("Canned soup", "food", 1.0);
        item.recommended_quantity = Some(100.0);
        item.marked_as_enough = true;
        fixture.items.push(item);

        let alerts = fixture.alerts();
        assert!(alerts.iter().all(|a| a.id != "stock:food"));
    }

    #[test]
    fn excluded_rotation_items_take_no_part_in_stock_math() {
        let mut fixture = Fixture::new();
        let mut item = test_item("Fresh milk", "food", 0.0);
        item.is_normal_rotation = true;
        item.exclude_from_calculations = true;
        item.recommended_quantity = Some(10.0);
        fixture.items.push(item);

        let alerts = fixture.alerts();
        assert!(alerts.iter().all(|a| a.id != "stock:food"));
    }

    #[test]
    fn water_shortfall_warns_rounded_up_to_one_decimal() {
        let mut fixture = Fixture::new();
        // Requirement: 2 adults * 3 L * 10 days = 60 L; 49.86 on hand
        let water = test_item("Bottled water", "water", 49.86);
        fixture.items.push(water);

        let alerts = fixture.alerts();
        let water_alert = alerts.iter().find(|a| a.id == "water").unwrap();
        assert_eq!(water_alert.severity, Severity::Warning);
        assert_eq!(
            water_alert.message,
            "Water supply is short by 10.2 liters"
        );
    }

    #[test]
    fn covered_water_requirement_stays_silent() {
        let mut fixture = Fixture::new();
        fixture.items.push(test_item("Bottled water", "water", 60.0));

        let alerts = fixture.alerts();
        assert!(alerts.iter().all(|a| a.id != "water"));
    }

    #[test]
    fn alerts_sort_critical_first_and_stay_stable_within_severity() {
        let mut fixture = Fixture::new();

        // Warning: expiring soon
        let mut bread = test_item("Crispbread", "food", 10.0);
        bread.expiration_date = Some(today() + chrono::Duration::days(2));
        fixture.items.push(bread);

        // Critical: out of stock in medical
        fixture.items.push(test_item("Bandages", "medical", 0.0));

        // Warning: water shortfall
        fixture.items.push(test_item("Bottled water", "water", 1.0));

        let alerts = fixture.alerts();
        assert_eq!(alerts[0].severity, Severity::Critical);
        // Expiration stage ran before the water stage; stable sort keeps it first
        let warning_ids: Vec<&str> = alerts
            .iter()
            .filter(|a| a.severity == Severity::Warning)
            .map(|a| a.id.as_str())
            .collect();
        let expiring_pos = warning_ids.iter().position(|id| id.starts_with("expiring:"));
        let water_pos = warning_ids.iter().position(|id| *id == "water");
        assert!(expiring_pos.unwrap() < water_pos.unwrap());
    }

    #[test]
    fn template_items_translate_and_fall_back_to_stored_name() {
        let mut def = kit_def("water", "water", 3.0, QuantityBasis::PerPersonPerDay);
        def.names
            .insert("de".to_string(), "Trinkwasser".to_string());
        let defs = vec![def];
        let translate = kit_translator(&defs, "de");

        let mut item = template_item("water", "water", 0.0);
        item.name = "stored name".to_string();
        item.expiration_date = Some(today() - chrono::Duration::days(1));

        let categories = Category::standard_set();
        let thresholds = AlertThresholds::default();
        let inputs = AlertInputs {
            items: std::slice::from_ref(&item),
            categories: &categories,
            household: None,
            recommended: &defs,
            children_multiplier: 0.5,
            thresholds: &thresholds,
            today: today(),
            language: "en",
            translate: &translate,
        };
        let alerts = generate_alerts(&inputs);
        assert_eq!(alerts[0].item_name.as_deref(), Some("Trinkwasser"));

        // A translator with no entry returns the key verbatim -> stored name
        let empty: Vec<KitItem> = Vec::new();
        let fallback = kit_translator(&empty, "de");
        let inputs = AlertInputs {
            items: std::slice::from_ref(&item),
            categories: &categories,
            household: None,
            recommended: &defs,
            children_multiplier: 0.5,
            thresholds: &thresholds,
            today: today(),
            language: "en",
            translate: &fallback,
        };
        let alerts = generate_alerts(&inputs);
        assert_eq!(alerts[0].item_name.as_deref(), Some("stored name"));
    }
}
