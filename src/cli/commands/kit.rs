//! Kit management commands.

use clap::Subcommand;
use std::path::PathBuf;

use crate::errors::{Error, Result};
use crate::model::{BUILTIN_KIT_ID, Kit, builtin_kit};
use crate::store::{DataStore, StorageBackend};

/// Kit operations.
#[derive(Debug, Subcommand)]
pub enum KitCommand {
    /// List available kits and the selection
    List,
    /// Select a kit; its definitions replace the active recommendations
    Select {
        /// Kit id
        id: String,
    },
    /// Load a custom kit from a JSON file and select it
    Load {
        /// Kit file
        file: PathBuf,
    },
    /// Exclude a kit item from recommendations
    Disable {
        /// Kit item id
        item_id: String,
    },
    /// Re-include a previously disabled kit item
    Enable {
        /// Kit item id
        item_id: String,
    },
}

/// Runs a kit operation against the active inventory set.
pub fn run<B: StorageBackend>(command: KitCommand, store: &mut DataStore<B>) -> Result<()> {
    match command {
        KitCommand::List => {
            let builtin = builtin_kit()?;
            let set = store.active_set();
            let selected = &set.settings.selected_kit_id;

            println!("Kits:");
            let marker = if selected == BUILTIN_KIT_ID { "*" } else { " " };
            println!(
                " {marker} {} | {} | {} items (built-in)",
                builtin.id,
                builtin.name,
                builtin.items.len()
            );
            if !set.custom_templates.is_empty() {
                let marker = if selected == BUILTIN_KIT_ID { " " } else { "*" };
                println!(
                    " {marker} {} | uploaded kit | {} items",
                    selected_custom_label(selected),
                    set.custom_templates.len()
                );
            }
            if !set.disabled_recommended_items.is_empty() {
                println!("Disabled items: {}", set.disabled_recommended_items.join(", "));
            }
            Ok(())
        }

        KitCommand::Select { id } => {
            if id != BUILTIN_KIT_ID && store.active_set().custom_templates.is_empty() {
                return Err(Error::Config {
                    message: "No custom kit loaded; use `kit load` first".to_string(),
                });
            }
            store.update_active_set(|set| {
                set.settings.selected_kit_id = id.clone();
            });
            println!("Selected kit {id}");
            Ok(())
        }

        KitCommand::Load { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let kit = Kit::from_json_str(&raw)?;
            if kit.id == BUILTIN_KIT_ID {
                return Err(Error::Config {
                    message: format!("Kit id {BUILTIN_KIT_ID} is reserved for the built-in kit"),
                });
            }

            let (id, name, count) = (kit.id.clone(), kit.name.clone(), kit.items.len());
            store.update_active_set(|set| {
                set.custom_templates = kit.items;
                set.settings.selected_kit_id = kit.id;
            });
            println!("Loaded and selected kit {name} ({id}) with {count} items");
            Ok(())
        }

        KitCommand::Disable { item_id } => {
            let mut changed = false;
            store.update_active_set(|set| {
                if !set.disabled_recommended_items.contains(&item_id) {
                    set.disabled_recommended_items.push(item_id.clone());
                    changed = true;
                }
            });
            if changed {
                println!("Disabled {item_id}");
            } else {
                println!("{item_id} was already disabled");
            }
            Ok(())
        }

        KitCommand::Enable { item_id } => {
            let mut changed = false;
            store.update_active_set(|set| {
                let before = set.disabled_recommended_items.len();
                set.disabled_recommended_items.retain(|id| id != &item_id);
                changed = set.disabled_recommended_items.len() != before;
            });
            if changed {
                println!("Enabled {item_id}");
            } else {
                println!("{item_id} was not disabled");
            }
            Ok(())
        }
    }
}

fn selected_custom_label(selected: &str) -> &str {
    if selected == BUILTIN_KIT_ID {
        "(not selected)"
    } else {
        selected
    }
}
