// ============================================================
// Layer 2 - SplitUseCase
// ============================================================
// Resolves the configured areas and divides them into a
// training and a validation list with a fixed seed. The two
// lists are meant to be fed into separate sample indices.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::application::dataset_config::DatasetConfig;
use crate::data::splitter::split_areas;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSplit {
    pub train:      Vec<String>,
    pub validation: Vec<String>,
}

impl AreaSplit {
    /// Config for the training side, everything else unchanged
    pub fn train_config(&self, base: &DatasetConfig) -> DatasetConfig {
        DatasetConfig { areas: self.train.clone(), ..base.clone() }
    }

    pub fn validation_config(&self, base: &DatasetConfig) -> DatasetConfig {
        DatasetConfig { areas: self.validation.clone(), ..base.clone() }
    }
}

pub struct SplitUseCase {
    config:         DatasetConfig,
    train_fraction: f64,
    seed:           u64,
}

impl SplitUseCase {
    pub fn new(config: DatasetConfig, train_fraction: f64, seed: u64) -> Self {
        Self { config, train_fraction, seed }
    }

    pub fn execute(&self) -> Result<AreaSplit> {
        let areas = self.config.resolve_areas()?;
        let (train, validation) = split_areas(areas, self.train_fraction, self.seed);
        tracing::info!("Split: {} train areas, {} validation areas", train.len(), validation.len());
        Ok(AreaSplit { train, validation })
    }
}
