// ============================================================
// Layer 2 - Dataset Configuration
// ============================================================
// Everything needed to construct either sample index:
//
//   root            directory holding one subdirectory per area
//   areas           ordered area identifiers; empty = every
//                   complete area found under root, by name
//   feature_mode    full | reduced
//   cache_capacity  areas kept in the LRU cache; 0 = no cache
//
// Serialisable so a configuration can be saved next to a
// training run and reloaded later (see infra::config_store).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::data::cache::AreaCache;
use crate::data::loader::NpyAreaLoader;
use crate::domain::feature_mode::FeatureMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub root:           String,
    pub areas:          Vec<String>,
    pub feature_mode:   FeatureMode,
    pub cache_capacity: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            root:           "data/areas".to_string(),
            areas:          Vec::new(),
            feature_mode:   FeatureMode::Full,
            cache_capacity: 0,
        }
    }
}

impl DatasetConfig {
    /// Loader for `root`, behind a cache sized by `cache_capacity`
    pub fn source(&self) -> AreaCache<NpyAreaLoader> {
        AreaCache::new(NpyAreaLoader::new(&self.root), self.cache_capacity)
    }

    /// The configured areas, or every complete area under `root`
    /// when none are listed.
    pub fn resolve_areas(&self) -> Result<Vec<String>> {
        if !self.areas.is_empty() {
            return Ok(self.areas.clone());
        }
        NpyAreaLoader::new(&self.root)
            .discover_areas()
            .with_context(|| format!("Cannot list areas under '{}'", self.root))
    }
}

/// Which sample index to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One (N, N, 2F+1) sample per area
    #[default]
    Area,
    /// One (2F+1,) sample per ordered location pair
    Pair,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Area => write!(f, "area"),
            Granularity::Pair => write!(f, "pair"),
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "area" => Ok(Granularity::Area),
            "pair" => Ok(Granularity::Pair),
            other  => Err(format!("unknown granularity '{other}' (expected area|pair)")),
        }
    }
}
