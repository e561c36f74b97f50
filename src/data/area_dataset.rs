// ============================================================
// Layer 4 - Whole-Area Sample Index
// ============================================================
// One sample per area:
//
//   features  (N, N, 2F+1)   pairwise tensor of the area
//   target    (N, N)         observed OD flows
//   area      String         area identifier
//
// Nothing is precomputed. Every sample() call loads the area
// from the AreaSource and rebuilds the tensor, so memory use
// stays at one area at a time. Put an AreaCache in front of
// the source to keep recently used areas resident.
//
// Implements Burn's Dataset trait so a DataLoader can iterate
// it directly (pair it with AreaBatcher).
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

use burn::data::dataset::Dataset;
use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};

use crate::data::features::PairwiseFeatureBuilder;
use crate::domain::errors::{DatasetError, DatasetResult};
use crate::domain::feature_mode::FeatureMode;
use crate::domain::traits::AreaSource;

/// The full pairwise tensor and OD matrix of one area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSample {
    pub features: Array3<f32>,
    pub target:   Array2<f32>,
    pub area:     String,
}

impl AreaSample {
    pub fn location_count(&self) -> usize {
        self.target.nrows()
    }

    /// Width of each pair feature vector (2F+1)
    pub fn feature_width(&self) -> usize {
        self.features.dim().2
    }
}

pub struct WholeAreaSampleIndex<S> {
    source:  S,
    areas:   Vec<String>,
    mode:    FeatureMode,
    builder: PairwiseFeatureBuilder,
}

impl<S: AreaSource> WholeAreaSampleIndex<S> {
    /// The area list is copied; later changes to the caller's list
    /// have no effect on the index.
    pub fn new<I>(source: S, areas: I, mode: FeatureMode) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let areas: Vec<String> = areas.into_iter().map(Into::into).collect();
        tracing::debug!("Whole-area index over {} areas ({} mode)", areas.len(), mode);
        Self {
            source,
            areas,
            mode,
            builder: PairwiseFeatureBuilder::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn areas(&self) -> &[String] {
        &self.areas
    }

    pub fn mode(&self) -> FeatureMode {
        self.mode
    }

    /// Loads and builds the sample at `position`.
    pub fn sample(&self, position: usize) -> DatasetResult<AreaSample> {
        let area = self.areas.get(position).ok_or(DatasetError::IndexOutOfRange {
            position,
            len: self.areas.len(),
        })?;

        let arrays   = self.source.load(area)?;
        let features = self.builder.build_area(&arrays, self.mode)?;
        arrays.check_target()?;

        Ok(AreaSample {
            features,
            target: arrays.od_flow,
            area:   area.clone(),
        })
    }
}

// Burn's DatasetIterator stops at the first None, so None is reserved
// for positions past the end. A load or build failure inside the range
// panics instead of cutting the epoch short; call sample() directly to
// handle those errors.
impl<S: AreaSource> Dataset<AreaSample> for WholeAreaSampleIndex<S> {
    fn get(&self, index: usize) -> Option<AreaSample> {
        match self.sample(index) {
            Ok(sample) => Some(sample),
            Err(DatasetError::IndexOutOfRange { .. }) => None,
            Err(e) => {
                tracing::error!("Failed to build sample {}: {}", index, e);
                panic!("cannot build area sample {index}: {e}");
            }
        }
    }

    fn len(&self) -> usize {
        self.areas.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::{fixtures, InMemoryAreaSource};
    use ndarray::{array, s};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_length_is_area_count() {
        let index = WholeAreaSampleIndex::new(fixtures::three_area_source(), ["A", "B", "C"], FeatureMode::Full);
        assert_eq!(index.len(), 3);
        assert_eq!(Dataset::len(&index), 3);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_concrete_scenario() {
        let index  = WholeAreaSampleIndex::new(fixtures::three_area_source(), ["A"], FeatureMode::Full);
        let sample = index.sample(0).unwrap();

        assert_eq!(sample.area, "A");
        assert_eq!(sample.features.dim(), (2, 2, 5));
        assert_eq!(sample.features.slice(s![0, 1, ..]).to_vec(), vec![10.0, 1.0, 20.0, 2.0, 5.0]);
        assert_eq!(sample.features.slice(s![1, 0, ..]).to_vec(), vec![20.0, 2.0, 10.0, 1.0, 5.0]);
        assert_eq!(sample.target, array![[0.0, 3.0], [4.0, 0.0]]);
    }

    #[test]
    fn test_single_location_area() {
        let index  = WholeAreaSampleIndex::new(fixtures::three_area_source(), ["C"], FeatureMode::Full);
        let sample = index.sample(0).unwrap();
        assert_eq!(sample.features.dim(), (1, 1, 7));
        assert_eq!(sample.location_count(), 1);
        assert_eq!(sample.feature_width(), 7);
    }

    #[test]
    fn test_reduced_mode_width() {
        let index  = WholeAreaSampleIndex::new(fixtures::three_area_source(), ["B"], FeatureMode::Reduced);
        let sample = index.sample(0).unwrap();
        assert_eq!(sample.features.dim(), (3, 3, 3));
    }

    #[test]
    fn test_out_of_range() {
        let index = WholeAreaSampleIndex::new(fixtures::three_area_source(), ["A", "B"], FeatureMode::Full);
        assert!(matches!(
            index.sample(2),
            Err(DatasetError::IndexOutOfRange { position: 2, len: 2 })
        ));
        assert!(index.get(5).is_none());
    }

    #[test]
    fn test_area_list_is_copied() {
        let mut areas = vec!["A".to_string(), "B".to_string()];
        let index = WholeAreaSampleIndex::new(fixtures::three_area_source(), areas.clone(), FeatureMode::Full);
        areas.push("C".to_string());
        assert_eq!(index.len(), 2);
        assert_eq!(index.areas(), &["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_missing_area_propagates() {
        let index = WholeAreaSampleIndex::new(InMemoryAreaSource::new(), ["ghost"], FeatureMode::Full);
        assert!(matches!(index.sample(0), Err(DatasetError::StorageNotFound { .. })));
    }

    #[test]
    fn test_iteration_visits_every_area() {
        let index = WholeAreaSampleIndex::new(fixtures::three_area_source(), ["A", "B", "C"], FeatureMode::Full);
        let areas: Vec<String> = index.iter().map(|s| s.area).collect();
        assert_eq!(areas, vec!["A".to_string(), "B".to_string(), "C".to_string()]);
    }

    #[test]
    #[should_panic(expected = "storage not found")]
    fn test_iteration_fails_loudly_on_missing_area() {
        let index = WholeAreaSampleIndex::new(fixtures::three_area_source(), ["A", "ghost", "B"], FeatureMode::Full);
        let _ = index.iter().count();
    }

    #[test]
    fn test_mismatched_od_is_shape_error() {
        let mut area = fixtures::two_location_area();
        area.od_flow = Array2::zeros((3, 3));
        let source = InMemoryAreaSource::new().with_area("bad", area);
        let index  = WholeAreaSampleIndex::new(source, ["bad"], FeatureMode::Full);
        assert!(matches!(index.sample(0), Err(DatasetError::ShapeMismatch(_))));
    }

    struct CountingSource {
        inner: InMemoryAreaSource,
        loads: AtomicUsize,
    }

    impl AreaSource for CountingSource {
        fn load(&self, area: &str) -> DatasetResult<crate::domain::area::AreaArrays> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.inner.load(area)
        }
    }

    #[test]
    fn test_every_access_reloads() {
        let source = CountingSource {
            inner: fixtures::three_area_source(),
            loads: AtomicUsize::new(0),
        };
        let index = WholeAreaSampleIndex::new(source, ["A"], FeatureMode::Full);
        let first  = index.sample(0).unwrap();
        let second = index.sample(0).unwrap();

        assert_eq!(first, second);
        assert_eq!(index.source.loads.load(Ordering::SeqCst), 2);
    }
}
