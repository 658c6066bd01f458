//! Command-line interface.
//!
//! Argument parsing and a thin dispatch layer; every handler wraps a
//! library call and owns only I/O and formatting. The engines and the
//! store never print.

/// Command handlers
pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::session::DiagnosticsSession;
use crate::store::{DataStore, StorageBackend};

/// Top-level argument structure.
#[derive(Debug, Parser)]
#[command(name = "pantry-buddy")]
#[command(about = "Local-first emergency supply inventory tracker")]
pub struct Cli {
    /// What to do
    #[command(subcommand)]
    pub command: Commands,
}

/// All top-level commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage inventory items
    Item {
        /// Item operation
        #[command(subcommand)]
        command: commands::item::ItemCommand,
    },
    /// Manage inventory sets
    Set {
        /// Inventory set operation
        #[command(subcommand)]
        command: commands::set::SetCommand,
    },
    /// Show or change the household configuration
    Household {
        /// Household operation
        #[command(subcommand)]
        command: commands::household::HouseholdCommand,
    },
    /// Manage recommendation kits
    Kit {
        /// Kit operation
        #[command(subcommand)]
        command: commands::kit::KitCommand,
    },
    /// Show stock levels against recommendations
    Status,
    /// List current alerts
    Alerts {
        /// Alert operation; plain `alerts` lists them
        #[command(subcommand)]
        command: Option<commands::report::AlertCommand>,
        /// Include dismissed alerts
        #[arg(long)]
        all: bool,
    },
    /// Write an export file
    Export {
        /// What to export
        #[command(subcommand)]
        command: commands::data::ExportCommand,
    },
    /// Replace all data from a backup file
    Import {
        /// Backup file to import
        file: std::path::PathBuf,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Write the diagnostic dump
    DebugDump {
        /// Directory to write into (default: current directory)
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
}

/// Dispatches a parsed invocation against the store.
///
/// # Errors
/// Returns an error when a handler fails; storage degradation inside the
/// store is not an error here.
pub fn run<B: StorageBackend>(
    cli: Cli,
    store: &mut DataStore<B>,
    config: &AppConfig,
    session: &mut DiagnosticsSession,
) -> Result<()> {
    match cli.command {
        Commands::Item { command } => {
            session.count("command.item");
            commands::item::run(command, store)
        }
        Commands::Set { command } => {
            session.count("command.set");
            commands::set::run(command, store)
        }
        Commands::Household { command } => {
            session.count("command.household");
            commands::household::run(command, store)
        }
        Commands::Kit { command } => {
            session.count("command.kit");
            commands::kit::run(command, store)
        }
        Commands::Status => {
            session.count("command.status");
            commands::report::status(store, config)
        }
        Commands::Alerts { command, all } => {
            session.count("command.alerts");
            commands::report::alerts(command, all, store, config)
        }
        Commands::Export { command } => {
            session.count("command.export");
            commands::data::export(command, store, config)
        }
        Commands::Import { file, yes } => {
            session.count("command.import");
            commands::data::import(&file, yes, store, session)
        }
        Commands::DebugDump { out } => {
            session.count("command.debug_dump");
            commands::data::debug_dump(out.as_deref(), session)
        }
    }
}
