// ============================================================
// Layer 2 - SampleUseCase
// ============================================================
// Fetches a single sample by position from either index and
// turns it into a compact, serialisable view for the CLI.
//
// Pair samples are shown in full. Area samples are summarised
// (shape and total flow) since the tensor itself is N²·(2F+1)
// numbers.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::dataset_config::{DatasetConfig, Granularity};
use crate::data::area_dataset::WholeAreaSampleIndex;
use crate::data::pair_dataset::FlattenedPairSampleIndex;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SampleView {
    Area {
        area:       String,
        /// [N, N, 2F+1]
        shape:      [usize; 3],
        total_flow: f32,
    },
    Pair {
        area:        String,
        origin:      usize,
        destination: usize,
        target:      f32,
        features:    Vec<f32>,
    },
}

pub struct SampleUseCase {
    config:      DatasetConfig,
    granularity: Granularity,
}

impl SampleUseCase {
    pub fn new(config: DatasetConfig, granularity: Granularity) -> Self {
        Self { config, granularity }
    }

    pub fn fetch(&self, position: usize) -> Result<SampleView> {
        let cfg   = &self.config;
        let areas = cfg.resolve_areas()?;

        match self.granularity {
            Granularity::Area => {
                let index  = WholeAreaSampleIndex::new(cfg.source(), areas, cfg.feature_mode);
                let sample = index
                    .sample(position)
                    .with_context(|| format!("Cannot fetch area sample {position}"))?;
                let (n, _, width) = sample.features.dim();
                Ok(SampleView::Area {
                    shape:      [n, n, width],
                    total_flow: sample.target.sum(),
                    area:       sample.area,
                })
            }
            Granularity::Pair => {
                let index = FlattenedPairSampleIndex::new(cfg.source(), areas, cfg.feature_mode)
                    .context("Cannot build pair index")?;
                let sample = index
                    .sample(position)
                    .with_context(|| format!("Cannot fetch pair sample {position}"))?;
                Ok(SampleView::Pair {
                    area:        sample.area,
                    origin:      sample.origin,
                    destination: sample.destination,
                    target:      sample.target,
                    features:    sample.features.to_vec(),
                })
            }
        }
    }
}
