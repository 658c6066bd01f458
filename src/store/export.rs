//! Export and import of the root document.
//!
//! Exports are built as (filename, contents) pairs; the CLI decides where
//! they land. Import never touches stored state: it parses, migrates, and
//! validates a candidate document and hands it back for the caller to
//! commit after explicit confirmation.

use chrono::NaiveDate;

use crate::core::shopping::{ShoppingList, format_shopping_list};
use crate::errors::{Error, Result};
use crate::model::AppData;
use crate::session::DiagnosticsSession;
use crate::store::migrate::migrate_document;
use crate::store::validate::validate_document;

/// A file ready to be written: name and contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    /// Suggested filename, date-stamped
    pub filename: String,
    /// Full file body
    pub contents: String,
}

/// Full-fidelity backup of the root document.
///
/// # Errors
/// Returns an error when the document fails to serialize.
pub fn backup_export(data: &AppData, today: NaiveDate) -> Result<ExportFile> {
    Ok(ExportFile {
        filename: format!("emergency-supplies-backup-{}.json", today.format("%Y-%m-%d")),
        contents: serde_json::to_string_pretty(data)?,
    })
}

/// Plain-text shopping list export.
#[must_use]
pub fn shopping_list_export(list: &ShoppingList, today: NaiveDate) -> ExportFile {
    ExportFile {
        filename: format!("shopping-list-{}.txt", today.format("%Y-%m-%d")),
        contents: format_shopping_list(list),
    }
}

/// Diagnostic export: session id/start, counters, and buffered log
/// entries. Not a restore format.
///
/// # Errors
/// Returns an error when the report fails to serialize.
pub fn debug_export(session: &DiagnosticsSession, today: NaiveDate) -> Result<ExportFile> {
    Ok(ExportFile {
        filename: format!("pantry-buddy-debug-{}.json", today.format("%Y-%m-%d")),
        contents: serde_json::to_string_pretty(&session.report())?,
    })
}

/// Parses and validates an uploaded document without touching stored
/// state. The returned document is migrated to the current version and
/// ready to commit via the store once the user has confirmed.
///
/// # Errors
/// Returns [`Error::InvalidDocument`] when the candidate fails structural
/// validation, [`Error::UnsupportedVersion`] when it was written by a
/// newer build, and a JSON error when it does not parse at all.
pub fn prepare_import(raw: &str) -> Result<AppData> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let migrated = migrate_document(value)?;

    let report = validate_document(&migrated);
    if !report.is_valid {
        return Err(Error::InvalidDocument { report });
    }

    serde_json::from_value(migrated).map_err(Error::from)
}
