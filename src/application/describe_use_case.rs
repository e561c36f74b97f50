// ============================================================
// Layer 2 - DescribeUseCase
// ============================================================
// Builds the requested sample index over the configured areas
// and reports what it contains:
//
//   Step 1: Resolve the area list     (config or directory scan)
//   Step 2: Build the sample index    (Layer 4 - data)
//   Step 3: Summarise per area        (N, pair width, sample count)
//
// For the whole-area index every area is loaded once so its
// shape can be reported; the pair index is fully built anyway.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::dataset_config::{DatasetConfig, Granularity};
use crate::data::area_dataset::WholeAreaSampleIndex;
use crate::data::pair_dataset::FlattenedPairSampleIndex;
use crate::domain::feature_mode::FeatureMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSummary {
    pub area:       String,
    pub locations:  usize,
    /// 2F+1
    pub pair_width: usize,
    pub samples:    usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub granularity:   Granularity,
    pub feature_mode:  FeatureMode,
    pub areas:         Vec<AreaSummary>,
    pub total_samples: usize,
}

pub struct DescribeUseCase {
    config:      DatasetConfig,
    granularity: Granularity,
}

impl DescribeUseCase {
    pub fn new(config: DatasetConfig, granularity: Granularity) -> Self {
        Self { config, granularity }
    }

    pub fn execute(&self) -> Result<DatasetSummary> {
        let cfg   = &self.config;
        let areas = cfg.resolve_areas()?;
        tracing::info!(
            "Describing {} areas under '{}' ({} granularity, {} features)",
            areas.len(),
            cfg.root,
            self.granularity,
            cfg.feature_mode,
        );

        let summaries = match self.granularity {
            Granularity::Area => self.describe_areas(areas)?,
            Granularity::Pair => self.describe_pairs(areas)?,
        };

        let total_samples = summaries.iter().map(|a| a.samples).sum();
        tracing::info!("Dataset holds {} samples", total_samples);

        Ok(DatasetSummary {
            granularity:  self.granularity,
            feature_mode: cfg.feature_mode,
            areas:        summaries,
            total_samples,
        })
    }

    fn describe_areas(&self, areas: Vec<String>) -> Result<Vec<AreaSummary>> {
        let index = WholeAreaSampleIndex::new(self.config.source(), areas, self.config.feature_mode);

        (0..index.len())
            .map(|position| -> Result<AreaSummary> {
                let sample = index
                    .sample(position)
                    .with_context(|| format!("Cannot build area '{}'", index.areas()[position]))?;
                tracing::debug!("Area '{}': {} locations", sample.area, sample.location_count());
                Ok(AreaSummary {
                    locations:  sample.location_count(),
                    pair_width: sample.feature_width(),
                    samples:    1,
                    area:       sample.area,
                })
            })
            .collect()
    }

    fn describe_pairs(&self, areas: Vec<String>) -> Result<Vec<AreaSummary>> {
        let index = FlattenedPairSampleIndex::new(self.config.source(), areas, self.config.feature_mode)
            .context("Cannot build pair index")?;
        let locator = index.locator();

        let mut summaries = Vec::with_capacity(index.areas().len());
        for (area_index, area) in index.areas().iter().enumerate() {
            let n = locator.location_count(area_index).unwrap_or(0);
            let pair_width = match locator.offset(area_index) {
                Some(offset) if n > 0 => index.sample(offset)?.features.len(),
                _ => 0,
            };
            summaries.push(AreaSummary {
                area:      area.clone(),
                locations: n,
                pair_width,
                samples:   n * n,
            });
        }
        Ok(summaries)
    }
}
