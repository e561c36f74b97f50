// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Three subcommands:
//   describe - build an index and summarise every area
//   sample   - print one sample by position
//   split    - seeded train/validation split of the areas
//
// All of them share DatasetArgs, which converts into the
// application-layer DatasetConfig. A --config file, when given,
// replaces the individual flags.

use anyhow::Result;
use clap::{Args, Subcommand};

use od_flow_dataset::application::dataset_config::{DatasetConfig, Granularity};
use od_flow_dataset::domain::feature_mode::FeatureMode;
use od_flow_dataset::infra::config_store::ConfigStore;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a sample index and summarise its areas
    Describe(DescribeArgs),

    /// Print a single sample
    Sample(SampleArgs),

    /// Split the areas into training and validation lists
    Split(SplitArgs),
}

/// Where the data lives and how samples are built
#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// Directory containing one subdirectory per area
    #[arg(long, default_value = "data/areas")]
    pub root: String,

    /// Comma-separated area identifiers; all complete areas under --root if omitted
    #[arg(long, value_delimiter = ',')]
    pub areas: Vec<String>,

    /// Per-location features: full (demographics + POIs) or reduced (population only)
    #[arg(long, default_value = "full")]
    pub feature_mode: FeatureMode,

    /// Number of areas to keep in memory between accesses (0 disables the cache)
    #[arg(long, default_value_t = 0)]
    pub cache_capacity: usize,

    /// Load the dataset configuration from a JSON file instead of the flags above
    #[arg(long)]
    pub config: Option<String>,

    /// Write the resolved dataset configuration to this JSON file
    #[arg(long)]
    pub save_config: Option<String>,
}

impl From<DatasetArgs> for DatasetConfig {
    fn from(a: DatasetArgs) -> Self {
        DatasetConfig {
            root:           a.root,
            areas:          a.areas,
            feature_mode:   a.feature_mode,
            cache_capacity: a.cache_capacity,
        }
    }
}

impl DatasetArgs {
    /// Resolve flags and the optional --config file into a DatasetConfig,
    /// saving it when --save-config is set.
    pub fn into_config(self) -> Result<DatasetConfig> {
        let save_to = self.save_config.clone();
        let cfg = match self.config.clone() {
            Some(path) => {
                tracing::info!("Loading dataset config from '{}'", path);
                ConfigStore::new(path).load()?
            }
            None => self.into(),
        };

        if let Some(path) = save_to {
            ConfigStore::new(path).save(&cfg)?;
        }
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
pub struct DescribeArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Sample granularity: area (one per area) or pair (one per location pair)
    #[arg(long, default_value = "area")]
    pub granularity: Granularity,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SampleArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Sample granularity: area or pair
    #[arg(long, default_value = "pair")]
    pub granularity: Granularity,

    /// Zero-based sample position
    #[arg(long)]
    pub position: usize,
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Fraction of areas that go to training
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,

    /// Shuffle seed
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}
