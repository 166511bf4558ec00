//! Storage configuration types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which store every entity operation is routed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Remote document store with atomic approval.
    #[default]
    Primary,
    /// Local key-value mirror, sequential writes.
    Local,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageMode::Primary => "primary",
            StorageMode::Local => "local",
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, StorageMode::Local)
    }
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "primary" => Ok(StorageMode::Primary),
            "local" => Ok(StorageMode::Local),
            other => Err(format!("unknown storage mode: {}", other)),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Starting mode. The persisted local-mode flag, when set, wins.
    pub mode: StorageMode,
    /// SQLite primary store.
    pub sqlite: SqliteConfig,
    /// Local mirror.
    pub local: LocalConfig,
}

/// SQLite-specific configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// Database file path. Created on first open.
    pub path: String,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: "data/rochedo.db".to_string(),
        }
    }
}

/// Local mirror configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    /// Directory holding one JSON file per collection.
    pub dir: String,
    /// Restore the touched collections when a local approval fails part-way.
    /// Default: false (earlier writes stay).
    pub rollback_on_failure: bool,
    /// Seed demo records into collections that have never been written.
    pub seed_demo_data: bool,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            dir: "data/local".to_string(),
            rollback_on_failure: false,
            seed_demo_data: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_default() {
        let storage = StorageConfig::default();
        assert_eq!(storage.mode, StorageMode::Primary);
        assert_eq!(storage.sqlite.path, "data/rochedo.db");
        assert_eq!(storage.local.dir, "data/local");
        assert!(!storage.local.rollback_on_failure);
        assert!(!storage.local.seed_demo_data);
    }

    #[test]
    fn test_storage_mode_parse() {
        assert_eq!("LOCAL".parse::<StorageMode>().unwrap(), StorageMode::Local);
        assert_eq!("primary".parse::<StorageMode>().unwrap(), StorageMode::Primary);
        assert!("firebase".parse::<StorageMode>().is_err());
    }
}
