//! Persistence of the dashboard dataset in a key-value slot

use crate::dataset::DashboardDataset;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Slot key the dataset is saved under unless configured otherwise
pub const STORAGE_KEY: &str = "warehouse_dashboard_data";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize dataset")]
    Serialize(#[from] serde_json::Error),
}

/// String key-value backend
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite whatever `key` held before
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process storage, lost on exit
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per slot inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        // Write beside the slot and rename over it so readers never see half a file
        let path = self.slot_path(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value).map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            StoreError::Io { path, source }
        })
    }
}

/// Saves and loads the whole dataset under one key
#[derive(Debug, Clone)]
pub struct DashboardStore<S: Storage> {
    storage: S,
    key: String,
}

impl<S: Storage> DashboardStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replace the stored dataset with `dataset`. There is no partial update.
    pub fn save(&mut self, dataset: &DashboardDataset) -> Result<(), StoreError> {
        let json = serde_json::to_string(dataset)?;
        self.storage.set_item(&self.key, &json)?;
        tracing::info!(key = %self.key, bytes = json.len(), "saved dashboard dataset");
        Ok(())
    }

    /// The last saved dataset.
    ///
    /// `None` if nothing was saved, the backend could not be read, or the
    /// stored content does not parse; callers fall back to the sample data.
    pub fn load(&self) -> Option<DashboardDataset> {
        let content = match self.storage.get_item(&self.key) {
            Ok(Some(content)) => content,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not read saved dataset");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(dataset) => Some(dataset),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding malformed saved dataset");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_before_save_is_absent() {
        let store = DashboardStore::new(MemoryStorage::new());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut store = DashboardStore::new(MemoryStorage::new());
        let mut dataset = DashboardDataset::default();
        dataset.top_products.reverse();
        dataset.stats[0].trend_up = false;

        store.save(&dataset).unwrap();
        assert_eq!(store.load(), Some(dataset));
    }

    #[test]
    fn test_save_overwrites_whole_slot() {
        let mut store = DashboardStore::new(MemoryStorage::new());
        store.save(&DashboardDataset::default()).unwrap();

        let mut smaller = DashboardDataset::default();
        smaller.sales_trend.truncate(1);
        smaller.gp_analysis.clear();
        store.save(&smaller).unwrap();

        assert_eq!(store.load(), Some(smaller));
    }

    #[test]
    fn test_malformed_content_loads_as_absent() {
        let mut storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY, "{\"stats\": [").unwrap();
        assert!(DashboardStore::new(storage).load().is_none());

        let mut storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY, r#"{"stats": []}"#).unwrap();
        assert!(DashboardStore::new(storage).load().is_none());
    }

    #[test]
    fn test_custom_key() {
        let mut store = DashboardStore::with_key(MemoryStorage::new(), "other_slot");
        store.save(&DashboardDataset::default()).unwrap();

        assert!(store.storage().get_item(STORAGE_KEY).unwrap().is_none());
        assert!(store.storage().get_item("other_slot").unwrap().is_some());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the slot's place makes the rename fail
        fs::create_dir(dir.path().join(format!("{}.json", STORAGE_KEY))).unwrap();
        fs::write(dir.path().join(format!("{}.json", STORAGE_KEY)).join("keep"), "x").unwrap();

        let mut store = DashboardStore::new(FileStorage::new(dir.path()));
        let err = store.save(&DashboardDataset::default()).unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!dir.path().join(format!("{}.json.tmp", STORAGE_KEY)).exists());
    }
}
