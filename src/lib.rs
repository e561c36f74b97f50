//! Pairwise origin-destination samples for commuting flow prediction.
//!
//! Each area directory holds per-location demographics and POI features,
//! a distance matrix and an observed OD matrix. The crate turns those into
//! an `(N, N, 2F+1)` pairwise feature tensor and exposes it either one area
//! at a time ([`WholeAreaSampleIndex`]) or one ordered location pair at a
//! time ([`FlattenedPairSampleIndex`]). Both implement Burn's `Dataset`.

pub mod application;
pub mod data;
pub mod domain;
pub mod infra;

pub use data::area_dataset::{AreaSample, WholeAreaSampleIndex};
pub use data::cache::AreaCache;
pub use data::features::PairwiseFeatureBuilder;
pub use data::loader::NpyAreaLoader;
pub use data::memory::InMemoryAreaSource;
pub use data::pair_dataset::{FlattenedPairSampleIndex, PairLocation, PairLocator, PairSample};
pub use domain::area::AreaArrays;
pub use domain::errors::{DatasetError, DatasetResult};
pub use domain::feature_mode::FeatureMode;
pub use domain::traits::AreaSource;
