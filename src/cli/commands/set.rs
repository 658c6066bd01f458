//! Inventory set management commands.

use clap::Subcommand;

use crate::errors::{Error, Result};
use crate::store::{DataStore, StorageBackend};

/// Inventory set operations.
#[derive(Debug, Subcommand)]
pub enum SetCommand {
    /// List all inventory sets
    List,
    /// Create a new, empty inventory set
    Create {
        /// Name for the new set
        name: String,
    },
    /// Rename an inventory set
    Rename {
        /// Set id
        id: String,
        /// New name
        name: String,
    },
    /// Switch the active inventory set
    Switch {
        /// Set id
        id: String,
    },
    /// Delete an inventory set
    Delete {
        /// Set id
        id: String,
    },
}

/// Runs an inventory set operation.
pub fn run<B: StorageBackend>(command: SetCommand, store: &mut DataStore<B>) -> Result<()> {
    match command {
        SetCommand::List => {
            let data = store.data();
            println!("Inventory sets:");
            for set in &data.inventory_sets {
                let marker = if set.id == data.active_inventory_set_id {
                    "*"
                } else {
                    " "
                };
                println!(
                    " {marker} {} | {} | {} items",
                    set.id,
                    set.name,
                    set.items.len()
                );
            }
            Ok(())
        }

        SetCommand::Create { name } => {
            let id = store.create_inventory_set(&name);
            println!("Created inventory set {name} ({id})");
            Ok(())
        }

        SetCommand::Rename { id, name } => {
            if store.rename_inventory_set(&id, &name) {
                println!("Renamed {id} to {name}");
                Ok(())
            } else {
                Err(Error::Config {
                    message: format!("No inventory set with id {id}"),
                })
            }
        }

        SetCommand::Switch { id } => {
            if store.set_active_inventory_set(&id) {
                println!("Switched to {}", store.active_set().name);
                Ok(())
            } else {
                Err(Error::Config {
                    message: format!("No inventory set with id {id}"),
                })
            }
        }

        SetCommand::Delete { id } => {
            if store.delete_inventory_set(&id) {
                println!("Deleted {id}; active set is now {}", store.active_set().name);
                Ok(())
            } else {
                Err(Error::Config {
                    message: format!("No inventory set with id {id}"),
                })
            }
        }
    }
}
