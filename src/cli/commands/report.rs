//! Status and alert reporting commands.

use chrono::Utc;
use clap::Subcommand;

use crate::config::AppConfig;
use crate::core::alerts::{AlertInputs, category_stock_levels, generate_alerts, kit_translator};
use crate::core::recommend::{
    active_recommended_items, calculate_water_requirements, children_multiplier,
};
use crate::errors::Result;
use crate::model::builtin_kit;
use crate::store::{DataStore, StorageBackend};

/// Alert operations beyond plain listing.
#[derive(Debug, Subcommand)]
pub enum AlertCommand {
    /// Dismiss an alert by id; it stays hidden until conditions change
    Dismiss {
        /// Alert id, as shown by `alerts`
        id: String,
    },
}

/// Generates a progress bar string like `[████████░░] 80%`.
fn format_progress_bar(percent: f64, bar_length: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);

    // Cast safety: clamped ∈ [0, 100], bar_length is small.
    // Result is mathematically in [0, bar_length].
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * bar_length as f64).round() as usize;
    let empty = bar_length.saturating_sub(filled);

    format!("[{}{}] {percent:.0}%", "█".repeat(filled), "░".repeat(empty))
}

/// Prints per-category stock levels and the water situation.
pub fn status<B: StorageBackend>(store: &DataStore<B>, config: &AppConfig) -> Result<()> {
    let builtin = builtin_kit()?;
    let set = store.active_set();
    let defs = active_recommended_items(set, &builtin);
    let multiplier = children_multiplier(&set.settings);
    let language = set.settings.language.clone();
    let translate = kit_translator(&defs, &language);

    let inputs = AlertInputs {
        items: &set.items,
        categories: &set.categories,
        household: Some(&set.household),
        recommended: &defs,
        children_multiplier: multiplier,
        thresholds: &config.thresholds,
        today: Utc::now().date_naive(),
        language: &language,
        translate: &translate,
    };

    println!("Status of {} ({} items)", set.name, set.items.len());

    let levels = category_stock_levels(&inputs);
    if levels.is_empty() {
        println!("  No stocked categories yet");
    }
    for stock in &levels {
        println!(
            "  {:<20} {} ({} of {})",
            stock.display_name,
            format_progress_bar(stock.percent, 10),
            stock.total_quantity,
            stock.total_recommended,
        );
    }

    let water = calculate_water_requirements(
        &set.items,
        &set.household,
        multiplier,
        &config.thresholds,
    );
    if water.has_enough {
        println!(
            "Water: {:.1} of {:.1} liters - covered",
            water.available_liters, water.required_liters
        );
    } else {
        println!(
            "Water: {:.1} of {:.1} liters - short by {:.1}",
            water.available_liters, water.required_liters, water.shortfall_liters
        );
    }

    Ok(())
}

/// Lists alerts, or dismisses one.
pub fn alerts<B: StorageBackend>(
    command: Option<AlertCommand>,
    include_dismissed: bool,
    store: &mut DataStore<B>,
    config: &AppConfig,
) -> Result<()> {
    if let Some(AlertCommand::Dismiss { id }) = command {
        if store.dismiss_alert(&id) {
            println!("Dismissed {id}");
        } else {
            println!("{id} was already dismissed");
        }
        return Ok(());
    }

    let builtin = builtin_kit()?;
    let set = store.active_set();
    let defs = active_recommended_items(set, &builtin);
    let multiplier = children_multiplier(&set.settings);
    let language = set.settings.language.clone();
    let translate = kit_translator(&defs, &language);

    let inputs = AlertInputs {
        items: &set.items,
        categories: &set.categories,
        household: Some(&set.household),
        recommended: &defs,
        children_multiplier: multiplier,
        thresholds: &config.thresholds,
        today: Utc::now().date_naive(),
        language: &language,
        translate: &translate,
    };

    let all = generate_alerts(&inputs);
    let visible: Vec<_> = all
        .iter()
        .filter(|a| include_dismissed || !set.dismissed_alert_ids.contains(&a.id))
        .collect();

    if visible.is_empty() {
        println!("No alerts");
        return Ok(());
    }

    for alert in visible {
        let dismissed = if set.dismissed_alert_ids.contains(&alert.id) {
            " (dismissed)"
        } else {
            ""
        };
        println!("[{}] {} ({}){}", alert.severity, alert.message, alert.id, dismissed);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_renders_filled_and_empty_segments() {
        assert_eq!(format_progress_bar(100.0, 10), "[██████████] 100%");
        assert_eq!(format_progress_bar(50.0, 10), "[█████░░░░░] 50%");
        assert_eq!(format_progress_bar(0.0, 10), "[░░░░░░░░░░] 0%");
    }

    #[test]
    fn progress_bar_clamps_out_of_range_percentages() {
        assert_eq!(format_progress_bar(250.0, 10), "[██████████] 250%");
        assert_eq!(format_progress_bar(-25.0, 10), "[░░░░░░░░░░] -25%");
    }
}
