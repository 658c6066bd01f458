//! Persistence layer.
//!
//! The single source of truth for the stored document: backends, the
//! document store, schema migration, structural validation, and the
//! export/import surface.

/// Storage backends - the file system seam
pub mod backend;
/// The document store - load, degrade, save, inventory-set management
pub mod data_store;
/// Export and import of the root document
pub mod export;
/// Schema migration chain
pub mod migrate;
/// Structural validation of parsed documents
pub mod validate;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use data_store::DataStore;
pub use export::{ExportFile, backup_export, debug_export, prepare_import, shopping_list_export};
pub use migrate::migrate_document;
pub use validate::{FieldError, ValidationReport, validate_document};
