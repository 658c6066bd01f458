//! Export, import, and diagnostic dump commands.

use chrono::Utc;
use clap::Subcommand;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::AppConfig;
use crate::core::alerts::kit_translator;
use crate::core::recommend::{active_recommended_items, children_multiplier};
use crate::core::shopping::build_shopping_list;
use crate::errors::Result;
use crate::model::builtin_kit;
use crate::session::DiagnosticsSession;
use crate::store::{
    DataStore, ExportFile, StorageBackend, backup_export, debug_export, prepare_import,
    shopping_list_export,
};

/// Export operations.
#[derive(Debug, Subcommand)]
pub enum ExportCommand {
    /// Full backup of all data as JSON
    Backup {
        /// Directory to write into (default: current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Plain-text shopping list of items below their recommendation
    ShoppingList {
        /// Directory to write into (default: current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn write_export(dir: Option<&Path>, file: &ExportFile) -> Result<PathBuf> {
    let dir = dir.unwrap_or_else(|| Path::new("."));
    let path = dir.join(&file.filename);
    std::fs::write(&path, &file.contents)?;
    Ok(path)
}

/// Writes an export file next to the user.
pub fn export<B: StorageBackend>(
    command: ExportCommand,
    store: &mut DataStore<B>,
    config: &AppConfig,
) -> Result<()> {
    let today = Utc::now().date_naive();

    match command {
        ExportCommand::Backup { out } => {
            let file = backup_export(store.data(), today)?;
            let path = write_export(out.as_deref(), &file)?;
            store.update(|data| {
                data.last_backup_date = Some(Utc::now());
            });
            println!("Backup written to {}", path.display());
            Ok(())
        }

        ExportCommand::ShoppingList { out } => {
            let builtin = builtin_kit()?;
            let set = store.active_set();
            let defs = active_recommended_items(set, &builtin);
            let multiplier = children_multiplier(&set.settings);
            let language = set.settings.language.clone();
            let translate = kit_translator(&defs, &language);

            let list = build_shopping_list(
                &set.items,
                &set.categories,
                &set.household,
                &defs,
                multiplier,
                &language,
                &translate,
            );
            let file = shopping_list_export(&list, today);
            let path = write_export(out.as_deref(), &file)?;
            println!(
                "Shopping list with {} entries written to {}",
                list.len(),
                path.display()
            );
            Ok(())
        }
    }
}

/// Replaces all data from a backup file after explicit confirmation.
///
/// A file that fails validation aborts without touching stored state.
pub fn import<B: StorageBackend>(
    file: &Path,
    assume_yes: bool,
    store: &mut DataStore<B>,
    session: &mut DiagnosticsSession,
) -> Result<()> {
    let raw = std::fs::read_to_string(file)?;
    let imported = prepare_import(&raw).inspect_err(|e| {
        session.note("warn", format!("import rejected: {e}"));
    })?;

    let set_count = imported.inventory_sets.len();
    let item_count: usize = imported.inventory_sets.iter().map(|s| s.items.len()).sum();
    println!(
        "Import of {} contains {set_count} inventory sets with {item_count} items.",
        file.display()
    );

    if !assume_yes && !confirm_replace()? {
        println!("Import cancelled; existing data is unchanged");
        return Ok(());
    }

    store.replace(imported);
    session.note("info", "import committed");
    info!("Import committed from {:?}", file);
    println!("Import complete");
    Ok(())
}

/// Asks the user to confirm replacing all data.
fn confirm_replace() -> Result<bool> {
    print!("This REPLACES all existing data. Type 'yes' to continue: ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}

/// Writes the diagnostic dump: session id, counters, buffered log entries.
pub fn debug_dump(out: Option<&Path>, session: &mut DiagnosticsSession) -> Result<()> {
    session.note("info", "debug dump requested");
    let file = debug_export(session, Utc::now().date_naive())?;
    let path = write_export(out, &file)?;
    println!("Debug dump written to {}", path.display());
    Ok(())
}
