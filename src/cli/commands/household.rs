//! Household configuration commands.

use clap::Subcommand;

use crate::errors::Result;
use crate::store::{DataStore, StorageBackend};

/// Household operations.
#[derive(Debug, Subcommand)]
pub enum HouseholdCommand {
    /// Show the active set's household configuration
    Show,
    /// Update household fields; unspecified fields are left alone
    Set {
        /// Number of adults
        #[arg(long)]
        adults: Option<u32>,
        /// Number of children
        #[arg(long)]
        children: Option<u32>,
        /// Supply duration target in days
        #[arg(long)]
        days: Option<u32>,
        /// Whether a freezer is available
        #[arg(long)]
        freezer: Option<bool>,
        /// Children's share of an adult requirement, in percent
        #[arg(long)]
        children_percent: Option<f64>,
    },
}

/// Runs a household operation against the active inventory set.
pub fn run<B: StorageBackend>(command: HouseholdCommand, store: &mut DataStore<B>) -> Result<()> {
    match command {
        HouseholdCommand::Show => {
            let set = store.active_set();
            let household = &set.household;
            println!("Household of {}:", set.name);
            println!("  adults: {}", household.adults);
            println!("  children: {}", household.children);
            println!("  supply duration: {} days", household.supply_duration_days);
            println!("  freezer: {}", household.freezer_available);
            match set.settings.children_requirement_percentage {
                Some(pct) => println!("  children requirement: {pct}%"),
                None => println!("  children requirement: default"),
            }
            Ok(())
        }

        HouseholdCommand::Set {
            adults,
            children,
            days,
            freezer,
            children_percent,
        } => {
            store.update_active_set(|set| {
                if let Some(adults) = adults {
                    set.household.adults = adults;
                }
                if let Some(children) = children {
                    set.household.children = children;
                }
                if let Some(days) = days {
                    set.household.supply_duration_days = days;
                }
                if let Some(freezer) = freezer {
                    set.household.freezer_available = freezer;
                }
                if children_percent.is_some() {
                    set.settings.children_requirement_percentage = children_percent;
                }
            });
            println!("Household updated");
            Ok(())
        }
    }
}
