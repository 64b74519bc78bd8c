//! File-backed key-value storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::StorageBackend;
use crate::{Error, Result};

/// Directory name under the user config directory.
const APP_DIR: &str = "credledger";

/// File name of the backing store.
const STORAGE_FILE: &str = "storage.json";

/// Key-value storage persisted as a single JSON file.
///
/// The file holds one JSON object mapping keys to string values. Every
/// `set`/`remove` rereads the file, applies the change, and rewrites it,
/// so concurrent processes see each other's writes (last writer wins).
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create storage backed by the file at `path`.
    ///
    /// The file and its parent directories are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create storage at the platform default location,
    /// `<config_dir>/credledger/storage.json`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the platform has no user config
    /// directory.
    pub fn at_default_path() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Resolve the platform default storage file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the platform has no user config
    /// directory.
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("no user config directory".to_string()))?;
        Ok(dir.join(APP_DIR).join(STORAGE_FILE))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, contents)?;
        debug!("Wrote {} keys to {:?}", map.len(), self.path);
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut map = self.read_map()?;
        Ok(map.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::account::AccountId;

    /// Unique temp file path, removed when the guard drops.
    struct TempPath(PathBuf);

    impl TempPath {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("credledger-test-{}", AccountId::new()));
            Self(dir.join(STORAGE_FILE))
        }
    }

    impl Drop for TempPath {
        fn drop(&mut self) {
            if let Some(parent) = self.0.parent() {
                let _ = fs::remove_dir_all(parent);
            }
        }
    }

    #[test]
    fn get_before_first_write_is_none() {
        let path = TempPath::new();
        let storage = FileStorage::new(&path.0);
        assert_eq!(storage.get("accounts").unwrap(), None);
    }

    #[test]
    fn set_creates_parent_directories() {
        let path = TempPath::new();
        let mut storage = FileStorage::new(&path.0);

        storage.set("accounts", "[]").unwrap();

        assert!(path.0.exists());
        assert_eq!(storage.get("accounts").unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn values_survive_reopening() {
        let path = TempPath::new();
        {
            let mut storage = FileStorage::new(&path.0);
            storage.set("accounts", "[1,2,3]").unwrap();
        }

        let storage = FileStorage::new(&path.0);
        assert_eq!(storage.get("accounts").unwrap(), Some("[1,2,3]".to_string()));
    }

    #[test]
    fn set_preserves_other_keys() {
        let path = TempPath::new();
        let mut storage = FileStorage::new(&path.0);

        storage.set("a", "1").unwrap();
        storage.set("b", "2").unwrap();

        assert_eq!(storage.get("a").unwrap(), Some("1".to_string()));
        assert_eq!(storage.get("b").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn remove_deletes_key() {
        let path = TempPath::new();
        let mut storage = FileStorage::new(&path.0);

        storage.set("accounts", "[]").unwrap();
        storage.remove("accounts").unwrap();

        assert_eq!(storage.get("accounts").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = TempPath::new();
        fs::create_dir_all(path.0.parent().unwrap()).unwrap();
        fs::write(&path.0, "not json").unwrap();

        let storage = FileStorage::new(&path.0);
        assert!(storage.get("accounts").is_err());
    }
}
