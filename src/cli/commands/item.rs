//! Item management commands.

use chrono::{NaiveDate, Utc};
use clap::{Subcommand, ValueEnum};
use uuid::Uuid;

use crate::errors::{Error, Result};
use crate::model::{InventoryItem, ItemType, Unit, builtin_kit};
use crate::store::{DataStore, StorageBackend};

/// Unit of measure as accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum UnitArg {
    /// Discrete pieces
    Pieces,
    /// Liters
    Liters,
    /// Kilograms
    Kilograms,
    /// Grams
    Grams,
    /// Cans
    Cans,
    /// Packs
    Packs,
}

impl From<UnitArg> for Unit {
    fn from(value: UnitArg) -> Self {
        match value {
            UnitArg::Pieces => Self::Pieces,
            UnitArg::Liters => Self::Liters,
            UnitArg::Kilograms => Self::Kilograms,
            UnitArg::Grams => Self::Grams,
            UnitArg::Cans => Self::Cans,
            UnitArg::Packs => Self::Packs,
        }
    }
}

/// Item operations.
#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    /// Add an item, free-form or from a kit template
    Add {
        /// Item name; optional when --template supplies one
        name: Option<String>,
        /// Category id (defaults to the template's category)
        #[arg(long)]
        category: Option<String>,
        /// On-hand quantity
        #[arg(long, default_value_t = 0.0)]
        quantity: f64,
        /// Unit of measure (defaults to the template's unit, else pieces)
        #[arg(long, value_enum)]
        unit: Option<UnitArg>,
        /// Kit item id to create this item from
        #[arg(long)]
        template: Option<String>,
        /// Expiration date (YYYY-MM-DD)
        #[arg(long)]
        expires: Option<NaiveDate>,
        /// The item never expires
        #[arg(long)]
        never_expires: bool,
        /// Free-text storage location
        #[arg(long)]
        location: Option<String>,
    },
    /// List items of the active inventory set
    List,
    /// Set an item's on-hand quantity
    SetQuantity {
        /// Item id
        id: String,
        /// New quantity
        quantity: f64,
    },
    /// Edit item fields; unspecified fields are left alone
    Edit {
        /// Item id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New expiration date (YYYY-MM-DD)
        #[arg(long)]
        expires: Option<NaiveDate>,
        /// New storage location
        #[arg(long)]
        location: Option<String>,
        /// Recommended-quantity override; overrides always win
        #[arg(long)]
        recommended: Option<f64>,
        /// Clear the recommended-quantity override
        #[arg(long)]
        clear_recommended: bool,
        /// Declare the current amount sufficient
        #[arg(long)]
        enough: bool,
        /// Withdraw a previous "enough" declaration
        #[arg(long)]
        not_enough: bool,
        /// Track this item by rough estimate instead of exact count
        #[arg(long)]
        rotation: bool,
        /// Rough on-hand estimate for rotation items
        #[arg(long)]
        estimate: Option<f64>,
        /// Exclude a rotation item from all calculations
        #[arg(long)]
        exclude: bool,
    },
    /// Remove an item
    Remove {
        /// Item id
        id: String,
    },
}

/// Runs an item operation against the active inventory set.
#[allow(clippy::too_many_lines)]
pub fn run<B: StorageBackend>(command: ItemCommand, store: &mut DataStore<B>) -> Result<()> {
    match command {
        ItemCommand::Add {
            name,
            category,
            quantity,
            unit,
            template,
            expires,
            never_expires,
            location,
        } => {
            if quantity < 0.0 {
                return Err(Error::Config {
                    message: "Quantity cannot be negative".to_string(),
                });
            }

            let language = store.active_set().settings.language.clone();
            let (name, category_id, unit, item_type, template_id) = match template {
                Some(template_id) => {
                    let kit = builtin_kit()?;
                    let def = kit
                        .items
                        .iter()
                        .find(|d| d.id == template_id)
                        .or_else(|| {
                            store
                                .active_set()
                                .custom_templates
                                .iter()
                                .find(|d| d.id == template_id)
                        })
                        .ok_or_else(|| Error::Config {
                            message: format!("Unknown template: {template_id}"),
                        })?;
                    (
                        name.unwrap_or_else(|| def.display_name(&language)),
                        category.unwrap_or_else(|| def.category_id.clone()),
                        unit.map_or(def.unit, Into::into),
                        ItemType::Template,
                        Some(template_id),
                    )
                }
                None => {
                    let name = name.ok_or_else(|| Error::Config {
                        message: "Either a name or --template is required".to_string(),
                    })?;
                    let category = category.ok_or_else(|| Error::Config {
                        message: "--category is required for custom items".to_string(),
                    })?;
                    (
                        name,
                        category,
                        unit.map_or(Unit::Pieces, Into::into),
                        ItemType::Custom,
                        None,
                    )
                }
            };

            let now = Utc::now();
            let item = InventoryItem {
                id: Uuid::new_v4().to_string(),
                name: name.clone(),
                category_id,
                quantity,
                unit,
                expiration_date: expires,
                never_expires,
                recommended_quantity: None,
                location,
                is_normal_rotation: false,
                estimated_quantity: None,
                exclude_from_calculations: false,
                marked_as_enough: false,
                item_type,
                template_id,
                created_at: now,
                updated_at: now,
            };
            let id = item.id.clone();
            store.update_active_set(|set| set.items.push(item));
            println!("Added {name} ({id})");
            Ok(())
        }

        ItemCommand::List => {
            let set = store.active_set();
            if set.items.is_empty() {
                println!("No items in {}", set.name);
                return Ok(());
            }
            println!("Items in {}:", set.name);
            for item in &set.items {
                let expiry = match (&item.expiration_date, item.never_expires) {
                    (_, true) => " | never expires".to_string(),
                    (Some(date), _) => format!(" | expires {date}"),
                    (None, false) => String::new(),
                };
                println!(
                    "  {} | {} | {} {}{}",
                    item.id, item.name, item.quantity, item.unit, expiry
                );
            }
            Ok(())
        }

        ItemCommand::SetQuantity { id, quantity } => {
            if quantity < 0.0 {
                return Err(Error::Config {
                    message: "Quantity cannot be negative".to_string(),
                });
            }
            let mut found = false;
            store.update_active_set(|set| {
                if let Some(item) = set.item_mut(&id) {
                    item.quantity = quantity;
                    item.touch(Utc::now());
                    found = true;
                }
            });
            if found {
                println!("Updated {id} to {quantity}");
                Ok(())
            } else {
                Err(Error::Config {
                    message: format!("No item with id {id}"),
                })
            }
        }

        ItemCommand::Edit {
            id,
            name,
            expires,
            location,
            recommended,
            clear_recommended,
            enough,
            not_enough,
            rotation,
            estimate,
            exclude,
        } => {
            let mut found = false;
            store.update_active_set(|set| {
                let Some(item) = set.item_mut(&id) else {
                    return;
                };
                found = true;
                if let Some(name) = name {
                    item.name = name;
                }
                if expires.is_some() {
                    item.expiration_date = expires;
                    item.never_expires = false;
                }
                if location.is_some() {
                    item.location = location;
                }
                if clear_recommended {
                    item.recommended_quantity = None;
                } else if recommended.is_some() {
                    item.recommended_quantity = recommended;
                }
                if enough {
                    item.marked_as_enough = true;
                }
                if not_enough {
                    item.marked_as_enough = false;
                }
                if rotation {
                    item.is_normal_rotation = true;
                }
                if estimate.is_some() {
                    item.estimated_quantity = estimate;
                }
                if exclude {
                    item.exclude_from_calculations = true;
                }
                item.touch(Utc::now());
            });
            if found {
                println!("Updated {id}");
                Ok(())
            } else {
                Err(Error::Config {
                    message: format!("No item with id {id}"),
                })
            }
        }

        ItemCommand::Remove { id } => {
            let mut removed = false;
            store.update_active_set(|set| {
                let before = set.items.len();
                set.items.retain(|i| i.id != id);
                removed = set.items.len() != before;
            });
            if removed {
                println!("Removed {id}");
                Ok(())
            } else {
                Err(Error::Config {
                    message: format!("No item with id {id}"),
                })
            }
        }
    }
}
