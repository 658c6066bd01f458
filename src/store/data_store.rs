//! The document store.
//!
//! Single source of truth for reading and writing the root document.
//! Storage failures are caught here, logged, and degraded — they never
//! propagate to callers as panics, and corrupted documents fall back to a
//! default document while the failure is kept around for surfacing.

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::{Error, Result};
use crate::model::{AppData, DEFAULT_SET_ID, InventorySet};
use crate::store::backend::StorageBackend;
use crate::store::migrate::migrate_document;
use crate::store::validate::{ValidationReport, validate_document};

/// Owns the in-memory document and the storage backend behind it.
///
/// All reads and writes of persisted state go through this type; callers
/// never touch the stored bytes. Mutations are whole-document
/// read-modify-write in a single call, so there is nothing to lock.
#[derive(Debug)]
pub struct DataStore<B: StorageBackend> {
    backend: B,
    current: AppData,
    last_validation: Option<ValidationReport>,
}

impl<B: StorageBackend> DataStore<B> {
    /// Opens the store, loading, migrating, and validating the stored
    /// document.
    ///
    /// An absent document is replaced by a freshly persisted default. A
    /// corrupt document (unparseable or structurally invalid) degrades to
    /// a default document in memory; the failure is retained in
    /// [`last_validation`](Self::last_validation) and the stored bytes
    /// are left untouched until the next explicit save.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedVersion`] when the stored document was
    /// written by a newer build; every other failure degrades instead.
    pub fn open(backend: B) -> Result<Self> {
        let raw = match backend.read() {
            Ok(raw) => raw,
            Err(e) => {
                error!("Failed to read stored document: {e}");
                None
            }
        };

        let mut store = Self {
            backend,
            current: AppData::default_document(Utc::now()),
            last_validation: None,
        };

        let Some(raw) = raw else {
            info!("No stored document found, starting with defaults");
            store.persist();
            return Ok(store);
        };

        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Stored document is not valid JSON: {e}");
                store.last_validation =
                    Some(ValidationReport::single("$", format!("not valid JSON: {e}")));
                return Ok(store);
            }
        };

        let migrated = match migrate_document(value) {
            Ok(migrated) => migrated,
            Err(e @ Error::UnsupportedVersion { .. }) => return Err(e),
            Err(e) => {
                warn!("Stored document could not be migrated: {e}");
                store.last_validation =
                    Some(ValidationReport::single("$", format!("migration failed: {e}")));
                return Ok(store);
            }
        };

        let report = validate_document(&migrated);
        if !report.is_valid {
            warn!("Stored document failed validation: {report}");
            store.last_validation = Some(report);
            return Ok(store);
        }

        match serde_json::from_value::<AppData>(migrated) {
            Ok(mut data) => {
                repair_active_pointer(&mut data);
                store.current = data;
            }
            Err(e) => {
                warn!("Stored document did not deserialize: {e}");
                store.last_validation =
                    Some(ValidationReport::single("$", format!("deserialization failed: {e}")));
            }
        }

        Ok(store)
    }

    /// The current document.
    #[must_use]
    pub fn data(&self) -> &AppData {
        &self.current
    }

    /// The outcome of the last failed load, if the stored document had to
    /// be replaced by defaults.
    #[must_use]
    pub fn last_validation(&self) -> Option<&ValidationReport> {
        self.last_validation.as_ref()
    }

    /// The storage backend, for inspection in tests.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The active inventory set.
    #[must_use]
    pub fn active_set(&self) -> &InventorySet {
        // The non-empty invariant is restored on load and after every
        // delete, so the fallback only guards hand-built states.
        self.current
            .active_set()
            .map_or_else(|| &self.current.inventory_sets[0], |set| set)
    }

    /// Mutates the document and persists the whole of it in one write.
    /// Write failures are logged; the in-memory state is kept either way.
    pub fn update<F: FnOnce(&mut AppData)>(&mut self, mutate: F) {
        mutate(&mut self.current);
        repair_active_pointer(&mut self.current);
        self.persist();
    }

    /// Mutates the active inventory set and persists.
    pub fn update_active_set<F: FnOnce(&mut InventorySet)>(&mut self, mutate: F) {
        let id = self.current.active_inventory_set_id.clone();
        if let Some(set) = self.current.inventory_sets.iter_mut().find(|s| s.id == id) {
            mutate(set);
        }
        self.persist();
    }

    /// Replaces the entire document, used by a confirmed import.
    pub fn replace(&mut self, mut data: AppData) {
        repair_active_pointer(&mut data);
        self.current = data;
        self.last_validation = None;
        self.persist();
        info!("Document replaced by import");
    }

    /// Serializes and writes the full document, stamping `last_modified`.
    ///
    /// # Errors
    /// Returns an error when serialization or the backend write fails.
    pub fn save(&mut self) -> Result<()> {
        self.current.last_modified = Utc::now();
        let raw = serde_json::to_string_pretty(&self.current)?;
        self.backend.write(&raw)
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            error!("Failed to persist document, keeping in-memory state: {e}");
        }
    }

    /// Creates a fresh, empty inventory set and returns its id.
    pub fn create_inventory_set(&mut self, name: &str) -> String {
        let id = Uuid::new_v4().to_string();
        self.current
            .inventory_sets
            .push(InventorySet::new(id.clone(), name));
        self.persist();
        info!("Created inventory set {id} ({name})");
        id
    }

    /// Deletes an inventory set. Deleting the active set falls back to
    /// the default set id. Returns false when the id does not exist.
    pub fn delete_inventory_set(&mut self, set_id: &str) -> bool {
        let before = self.current.inventory_sets.len();
        self.current.inventory_sets.retain(|s| s.id != set_id);
        if self.current.inventory_sets.len() == before {
            return false;
        }

        if self.current.active_inventory_set_id == set_id {
            self.current.active_inventory_set_id = DEFAULT_SET_ID.to_string();
        }
        repair_active_pointer(&mut self.current);
        self.persist();
        info!("Deleted inventory set {set_id}");
        true
    }

    /// Renames an inventory set; the name is the only field touched.
    /// Returns false when the id does not exist.
    pub fn rename_inventory_set(&mut self, set_id: &str, name: &str) -> bool {
        let Some(set) = self
            .current
            .inventory_sets
            .iter_mut()
            .find(|s| s.id == set_id)
        else {
            return false;
        };
        set.name = name.to_string();
        self.persist();
        true
    }

    /// Switches the active set. Unknown ids are a no-op returning false;
    /// callers re-check existence before switching.
    pub fn set_active_inventory_set(&mut self, set_id: &str) -> bool {
        if !self.current.set_exists(set_id) {
            warn!("Refusing to activate unknown inventory set {set_id}");
            return false;
        }
        self.current.active_inventory_set_id = set_id.to_string();
        self.persist();
        true
    }

    /// Records an alert dismissal on the active set.
    pub fn dismiss_alert(&mut self, alert_id: &str) -> bool {
        let id = self.current.active_inventory_set_id.clone();
        let Some(set) = self.current.inventory_sets.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        if set.dismissed_alert_ids.iter().any(|a| a == alert_id) {
            return false;
        }
        set.dismissed_alert_ids.push(alert_id.to_string());
        self.persist();
        true
    }
}

/// Restores the invariants "at least one set" and "active id resolves".
fn repair_active_pointer(data: &mut AppData) {
    if data.inventory_sets.is_empty() {
        data.inventory_sets
            .push(InventorySet::new(DEFAULT_SET_ID, "My supplies"));
        data.active_inventory_set_id = DEFAULT_SET_ID.to_string();
        return;
    }

    if !data.set_exists(&data.active_inventory_set_id) {
        data.active_inventory_set_id = if data.set_exists(DEFAULT_SET_ID) {
            DEFAULT_SET_ID.to_string()
        } else {
            data.inventory_sets[0].id.clone()
        };
    }
}
