//! Project-relative file store.
//!
//! The installer never touches `std::fs` directly. It asks a [`ProjectStore`]
//! whether a file exists, reads it as text, and writes it back in full. All
//! paths are relative to the project root and use forward slashes.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::{Error, NormalizedPath, Result, io};

/// Read/write access to the files of a single project.
pub trait ProjectStore {
    /// The project root. Used to build absolute command lines.
    fn root(&self) -> &NormalizedPath;

    /// Whether `path` exists and is a regular file.
    fn has(&self, path: &str) -> bool;

    /// Read `path` as UTF-8 text.
    fn read(&self, path: &str) -> Result<String>;

    /// Replace the content of `path`, creating it if needed.
    fn update(&self, path: &str, content: &str) -> Result<()>;

    /// Read `path` if it exists.
    fn read_optional(&self, path: &str) -> Result<Option<String>> {
        if !self.has(path) {
            return Ok(None);
        }
        self.read(path).map(Some)
    }
}

/// [`ProjectStore`] backed by the real filesystem.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: NormalizedPath,
}

impl DiskStore {
    /// Open a store rooted at `root`.
    ///
    /// The root is canonicalized so command lines built from it are absolute.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let canonical = dunce::canonicalize(root).map_err(|e| Error::io(root, e))?;
        Ok(Self {
            root: NormalizedPath::new(canonical),
        })
    }

    fn resolve(&self, path: &str) -> Result<NormalizedPath> {
        if NormalizedPath::escapes_root(path) {
            return Err(Error::OutsideRoot {
                path: path.to_string(),
            });
        }
        Ok(self.root.join(path))
    }
}

impl ProjectStore for DiskStore {
    fn root(&self) -> &NormalizedPath {
        &self.root
    }

    fn has(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn read(&self, path: &str) -> Result<String> {
        io::read_text(&self.resolve(path)?)
    }

    fn update(&self, path: &str, content: &str) -> Result<()> {
        io::write_text(&self.resolve(path)?, content)
    }
}

/// In-memory [`ProjectStore`] for tests.
///
/// Records every write so tests can assert that an operation was a no-op.
#[derive(Debug)]
pub struct MemoryStore {
    root: NormalizedPath,
    files: RefCell<BTreeMap<String, String>>,
    writes: RefCell<Vec<String>>,
    read_only: BTreeSet<String>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new("/project")
    }
}

impl MemoryStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: NormalizedPath::new(root),
            files: RefCell::new(BTreeMap::new()),
            writes: RefCell::new(Vec::new()),
            read_only: BTreeSet::new(),
        }
    }

    /// Seed a file without counting it as a write.
    pub fn with_file(self, path: &str, content: impl Into<String>) -> Self {
        self.files
            .borrow_mut()
            .insert(path.to_string(), content.into());
        self
    }

    /// Make every update of `path` fail with a permission error.
    pub fn with_read_only(mut self, path: &str) -> Self {
        self.read_only.insert(path.to_string());
        self
    }

    /// Current content of `path`.
    pub fn contents(&self, path: &str) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Paths written so far, in order, one entry per update.
    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl ProjectStore for MemoryStore {
    fn root(&self) -> &NormalizedPath {
        &self.root
    }

    fn has(&self, path: &str) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn read(&self, path: &str) -> Result<String> {
        self.files.borrow().get(path).cloned().ok_or_else(|| {
            Error::io(
                self.root.join(path).to_native(),
                std::io::Error::from(std::io::ErrorKind::NotFound),
            )
        })
    }

    fn update(&self, path: &str, content: &str) -> Result<()> {
        if self.read_only.contains(path) {
            return Err(Error::io(
                self.root.join(path).to_native(),
                std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            ));
        }
        self.files
            .borrow_mut()
            .insert(path.to_string(), content.to_string());
        self.writes.borrow_mut().push(path.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_tracks_writes() {
        let store = MemoryStore::default().with_file("composer.json", "{}");
        assert_eq!(store.write_count(), 0);

        store.update("composer.json", "{\"a\":1}").unwrap();

        assert_eq!(store.writes(), vec!["composer.json".to_string()]);
        assert_eq!(store.contents("composer.json").unwrap(), "{\"a\":1}");
    }

    #[test]
    fn memory_store_missing_file_is_not_found() {
        let store = MemoryStore::default();
        let err = store.read("composer.json").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.read_optional("composer.json").unwrap(), None);
    }

    #[test]
    fn memory_store_read_only_rejects_updates() {
        let store = MemoryStore::default()
            .with_file("composer.json", "{}")
            .with_read_only("composer.json");
        assert!(store.update("composer.json", "[]").is_err());
        assert_eq!(store.contents("composer.json").unwrap(), "{}");
    }
}
