//! Storage backends.
//!
//! The document store talks to local storage through this seam so tests
//! (and any future host) can swap the file system out for memory.

use crate::errors::{Error, Result};
use std::path::PathBuf;
use tracing::debug;

/// Raw read/write of the single stored document.
///
/// A backend stores exactly one string: the serialized root document.
/// Implementations must make `write` a single atomic-from-the-caller call.
pub trait StorageBackend {
    /// Reads the stored document, `None` when nothing was ever stored.
    ///
    /// # Errors
    /// Returns an error when the underlying storage cannot be read.
    fn read(&self) -> Result<Option<String>>;

    /// Replaces the stored document wholesale.
    ///
    /// # Errors
    /// Returns an error when the underlying storage cannot be written.
    fn write(&mut self, raw: &str) -> Result<()>;
}

/// File-backed storage, the production backend.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Creates a backend storing the document at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Storage {
                message: format!("Failed to read {:?}: {e}", self.path),
            }),
        }
    }

    fn write(&mut self, raw: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| Error::Storage {
                    message: format!("Failed to create {parent:?}: {e}"),
                })?;
                debug!("Created data directory {:?}", parent);
            }
        }
        std::fs::write(&self.path, raw).map_err(|e| Error::Storage {
            message: format!("Failed to write {:?}: {e}", self.path),
        })
    }
}

/// In-memory storage for tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    contents: Option<String>,
    fail_writes: bool,
}

impl MemoryBackend {
    /// An empty backend, as if the app had never run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend seeded with a stored document.
    #[must_use]
    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            contents: Some(raw.into()),
            fail_writes: false,
        }
    }

    /// Makes every subsequent write fail, simulating exhausted storage.
    pub fn fail_writes(&mut self) {
        self.fail_writes = true;
    }

    /// The currently stored document.
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, raw: &str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Storage {
                message: "storage quota exceeded".to_string(),
            });
        }
        self.contents = Some(raw.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn memory_backend_round_trips() {
        let mut backend = MemoryBackend::new();
        assert!(backend.read().unwrap().is_none());

        backend.write("{\"v\":1}").unwrap();
        assert_eq!(backend.read().unwrap().as_deref(), Some("{\"v\":1}"));
    }

    #[test]
    fn memory_backend_simulates_write_failure() {
        let mut backend = MemoryBackend::with_contents("old");
        backend.fail_writes();
        assert!(backend.write("new").is_err());
        assert_eq!(backend.read().unwrap().as_deref(), Some("old"));
    }

    #[test]
    fn file_backend_reports_absent_file_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("supplies.json"));
        assert!(backend.read().unwrap().is_none());
    }

    #[test]
    fn file_backend_creates_parent_directories_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/supplies.json");
        let mut backend = FileBackend::new(&path);

        backend.write("{}").unwrap();
        assert_eq!(backend.read().unwrap().as_deref(), Some("{}"));
        assert!(path.exists());
    }
}
