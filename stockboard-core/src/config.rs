//! Configuration for storage location and logging

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::{FileStorage, STORAGE_KEY};

/// Main configuration, read from `stockboard.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockboardConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StockboardConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: StockboardConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// File-backed storage rooted at the configured directory
    pub fn file_storage(&self) -> FileStorage {
        FileStorage::new(&self.storage.dir)
    }
}

/// Where the dataset slot lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON file per slot
    pub dir: PathBuf,
    /// Slot key for the dashboard dataset
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".stockboard"),
            key: STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: StockboardConfig = toml::from_str("").unwrap();
        assert_eq!(config, StockboardConfig::default());
        assert_eq!(config.storage.key, "warehouse_dashboard_data");
        assert_eq!(config.storage.dir, PathBuf::from(".stockboard"));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_sections() {
        let config: StockboardConfig = toml::from_str(
            r#"
            [storage]
            dir = "/var/lib/stockboard"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.dir, PathBuf::from("/var/lib/stockboard"));
        assert_eq!(config.storage.key, STORAGE_KEY);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.file_storage().dir(), Path::new("/var/lib/stockboard"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockboard.toml");
        fs::write(&path, "[storage]\nkey = \"osi_dashboard\"\n").unwrap();

        let config = StockboardConfig::from_file(&path).unwrap();
        assert_eq!(config.storage.key, "osi_dashboard");

        fs::write(&path, "[storage\n").unwrap();
        assert!(StockboardConfig::from_file(&path).is_err());
    }
}
