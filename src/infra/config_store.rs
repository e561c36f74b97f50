// ============================================================
// Layer 6 - Config Store
// ============================================================
// Reads and writes DatasetConfig as pretty-printed JSON.
//
// Example file:
//   {
//     "root": "data/areas",
//     "areas": ["tokyo_01", "tokyo_02"],
//     "feature_mode": "full",
//     "cache_capacity": 0
//   }
//
// Fields left out of the file take their default values.

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};

use crate::application::dataset_config::DatasetConfig;

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `cfg` to the store's path, creating parent directories
    pub fn save(&self, cfg: &DatasetConfig) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Cannot write config to '{}'", self.path.display()))?;

        tracing::debug!("Saved dataset config to '{}'", self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<DatasetConfig> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read config from '{}'", self.path.display()))?;

        serde_json::from_str(&json)
            .with_context(|| format!("Invalid dataset config in '{}'", self.path.display()))
    }
}
