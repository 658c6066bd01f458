//! Unified error types and result handling for `PantryBuddy`.

use crate::store::validate::ValidationReport;
use thiserror::Error;

/// Crate-wide error type.
///
/// Pure calculation code never constructs these; they originate at the
/// configuration, storage, and import boundaries.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// Storage backend failure (read or write of the document)
    #[error("Storage error: {message}")]
    Storage {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// I/O error outside the storage backend (export files, kit uploads)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// The stored document was written by a newer build; refusing to
    /// downgrade it silently
    #[error("Document version {found} is newer than this build supports (max {supported})")]
    UnsupportedVersion {
        /// Version recorded in the document
        found: u64,
        /// Highest version this build understands
        supported: u32,
    },

    /// A document failed structural validation
    #[error("Invalid document: {report}")]
    InvalidDocument {
        /// Field-level validation findings
        report: ValidationReport,
    },
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
