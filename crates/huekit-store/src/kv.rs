//! Key-value backends.
//!
//! Theme data is persisted as a handful of string values under fixed keys
//! (`customThemes`, `theme`, `themeMode`). [`KeyValueStore`] is the seam
//! between that data and where it lives:
//!
//! - [`MemoryStore`] keeps values in a map, for tests and one-shot runs.
//! - [`FileStore`] writes one `<key>.json` file per key under a directory.
//!
//! The trait is synchronous; values are small JSON documents.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// String values addressed by string keys.
pub trait KeyValueStore {
    /// Returns the value for `key`, or `None` if it was never set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Returns whether a value was present.
    fn remove(&mut self, key: &str) -> Result<bool>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        (**self).remove(key)
    }
}

// ─── Memory ─────────────────────────────────────────────────────────────────

/// An in-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.values.remove(key).is_some())
    }
}

// ─── Files ──────────────────────────────────────────────────────────────────

/// A directory of `<key>.json` files.
///
/// The directory is created on the first write. Writes go to a temporary
/// sibling first and are renamed into place, so a crash never leaves a
/// half-written value behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&path)(err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;

        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value).map_err(io_error(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_error(&path))?;

        tracing::debug!(key, path = %path.display(), bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(io_error(&path)(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(store: &mut impl KeyValueStore) {
        assert_eq!(store.get("theme").unwrap(), None);
        store.set("theme", "theme-ocean_1").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("theme-ocean_1"));
        store.set("theme", "theme-forest_2").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("theme-forest_2"));
        assert!(store.remove("theme").unwrap());
        assert!(!store.remove("theme").unwrap());
        assert_eq!(store.get("theme").unwrap(), None);
    }

    // =====================================================================
    // MemoryStore
    // =====================================================================

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        exercise(&mut store);
        assert!(store.is_empty());
    }

    #[test]
    fn mutable_reference_is_a_store() {
        fn write_mode(mut store: impl KeyValueStore) {
            store.set("themeMode", "dark").unwrap();
        }

        let mut store = MemoryStore::new();
        write_mode(&mut store);
        assert_eq!(store.get("themeMode").unwrap().as_deref(), Some("dark"));
    }

    // =====================================================================
    // FileStore
    // =====================================================================

    #[test]
    fn file_store_round_trip() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::new(tmp.path().join("nested").join("store"));
        exercise(&mut store);
    }

    #[test]
    fn file_store_writes_one_file_per_key() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::new(tmp.path());
        store.set("customThemes", "[]").unwrap();
        store.set("themeMode", "light").unwrap();

        let content = fs::read_to_string(tmp.path().join("customThemes.json")).unwrap();
        assert_eq!(content, "[]");
        assert!(tmp.path().join("themeMode.json").exists());
        assert!(!tmp.path().join(".themeMode.json.tmp").exists());
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::new(tmp.path());
        for key in ["", "../escape", "a/b", "with space"] {
            assert!(matches!(
                store.set(key, "x"),
                Err(StoreError::InvalidKey(_))
            ));
        }
    }
}
