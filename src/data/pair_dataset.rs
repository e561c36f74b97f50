// ============================================================
// Layer 4 - Flattened Pair Sample Index
// ============================================================
// One sample per ordered location pair (i, j), across every
// configured area:
//
//   features     (2F+1,)   x[i, j] of the area's pairwise tensor
//   target       f32       od[i, j]
//   area         String    area identifier
//   origin       usize     i
//   destination  usize     j
//
// Everything is built up front. For each area, in list order,
// the area is loaded once, its tensor built once, and then
// every pair is appended in row-major order:
//
//   area 0: (0,0) (0,1) … (0,N₀-1) (1,0) … (N₀-1,N₀-1)
//   area 1: (0,0) …
//
// Self-pairs (i = i) are kept. Total length is Σ N². Peak
// memory and construction time grow with Σ N²·(2F+1), not
// with the number of areas.
//
// A PairLocator records where each area's block starts, so a
// flat position can be decoded back to (area, i, j) without
// touching the samples.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators)

use burn::data::dataset::Dataset;
use ndarray::{s, Array1};
use serde::{Deserialize, Serialize};

use crate::data::features::PairwiseFeatureBuilder;
use crate::domain::errors::{DatasetError, DatasetResult};
use crate::domain::feature_mode::FeatureMode;
use crate::domain::traits::AreaSource;

/// Features and target of one (origin, destination) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSample {
    pub features:    Array1<f32>,
    pub target:      f32,
    pub area:        String,
    pub origin:      usize,
    pub destination: usize,
}

impl PairSample {
    pub fn is_self_pair(&self) -> bool {
        self.origin == self.destination
    }
}

// ─── PairLocator ──────────────────────────────────────────────────────────────
/// Where a flat position lands: the area's index in the configured
/// list and the pair coordinates inside that area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairLocation {
    pub area_index:  usize,
    pub origin:      usize,
    pub destination: usize,
}

/// Cumulative N² offsets over a list of areas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairLocator {
    /// (start offset, N) per area
    blocks: Vec<(usize, usize)>,
    total:  usize,
}

impl PairLocator {
    /// Builds offsets from the location count N of each area, in order
    pub fn new(location_counts: impl IntoIterator<Item = usize>) -> Self {
        let mut blocks = Vec::new();
        let mut total  = 0usize;
        for n in location_counts {
            blocks.push((total, n));
            total += n * n;
        }
        Self { blocks, total }
    }

    /// Total number of pairs across all areas
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn area_count(&self) -> usize {
        self.blocks.len()
    }

    /// First flat position of the area at `area_index`
    pub fn offset(&self, area_index: usize) -> Option<usize> {
        self.blocks.get(area_index).map(|&(start, _)| start)
    }

    /// N of the area at `area_index`
    pub fn location_count(&self, area_index: usize) -> Option<usize> {
        self.blocks.get(area_index).map(|&(_, n)| n)
    }

    /// Flat position of pair (origin, destination) in area `area_index`
    pub fn position(&self, area_index: usize, origin: usize, destination: usize) -> Option<usize> {
        let &(start, n) = self.blocks.get(area_index)?;
        (origin < n && destination < n).then(|| start + origin * n + destination)
    }

    /// Decodes a flat position back to (area, i, j)
    pub fn locate(&self, position: usize) -> Option<PairLocation> {
        if position >= self.total {
            return None;
        }
        // Last block starting at or before `position`; empty areas share
        // their start with the next block, so they are skipped.
        let area_index = self.blocks.partition_point(|&(start, _)| start <= position) - 1;
        let (start, n) = self.blocks[area_index];
        let local      = position - start;

        Some(PairLocation {
            area_index,
            origin:      local / n,
            destination: local % n,
        })
    }
}

// ─── FlattenedPairSampleIndex ─────────────────────────────────────────────────
pub struct FlattenedPairSampleIndex {
    samples: Vec<PairSample>,
    areas:   Vec<String>,
    locator: PairLocator,
    mode:    FeatureMode,
}

impl FlattenedPairSampleIndex {
    /// Loads every area and materialises all of its pair samples.
    ///
    /// The first load or build error aborts construction.
    pub fn new<S, I>(source: S, areas: I, mode: FeatureMode) -> DatasetResult<Self>
    where
        S: AreaSource,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let areas: Vec<String> = areas.into_iter().map(Into::into).collect();
        let builder = PairwiseFeatureBuilder::new();

        let mut samples = Vec::new();
        let mut counts  = Vec::with_capacity(areas.len());

        for area in &areas {
            let arrays = source.load(area)?;
            let x      = builder.build_area(&arrays, mode)?;
            arrays.check_target()?;

            let n = x.dim().0;
            samples.reserve(n * n);

            for i in 0..n {
                for j in 0..n {
                    samples.push(PairSample {
                        features:    x.slice(s![i, j, ..]).to_owned(),
                        target:      arrays.od_flow[[i, j]],
                        area:        area.clone(),
                        origin:      i,
                        destination: j,
                    });
                }
            }

            tracing::debug!("Area '{}': {} locations, {} pair samples", area, n, n * n);
            counts.push(n);
        }

        let locator = PairLocator::new(counts);
        tracing::info!(
            "Built {} pair samples from {} areas ({} mode)",
            samples.len(),
            areas.len(),
            mode,
        );

        Ok(Self { samples, areas, locator, mode })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn areas(&self) -> &[String] {
        &self.areas
    }

    pub fn mode(&self) -> FeatureMode {
        self.mode
    }

    pub fn locator(&self) -> &PairLocator {
        &self.locator
    }

    /// The pre-built sample at `position`
    pub fn sample(&self, position: usize) -> DatasetResult<PairSample> {
        self.samples
            .get(position)
            .cloned()
            .ok_or(DatasetError::IndexOutOfRange {
                position,
                len: self.samples.len(),
            })
    }

    /// Iterates the samples in construction order without cloning
    pub fn iter_samples(&self) -> impl Iterator<Item = &PairSample> {
        self.samples.iter()
    }
}

impl Dataset<PairSample> for FlattenedPairSampleIndex {
    fn get(&self, index: usize) -> Option<PairSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::{fixtures, InMemoryAreaSource};
    use crate::domain::area::AreaArrays;
    use ndarray::Array2;

    fn abc_index() -> FlattenedPairSampleIndex {
        FlattenedPairSampleIndex::new(fixtures::three_area_source(), ["A", "B", "C"], FeatureMode::Full).unwrap()
    }

    #[test]
    fn test_length_is_sum_of_squares() {
        let index = abc_index();
        assert_eq!(index.len(), 4 + 9 + 1);
        assert_eq!(Dataset::len(&index), 14);
        assert_eq!(index.locator().total(), 14);
    }

    #[test]
    fn test_concrete_scenario() {
        let index = FlattenedPairSampleIndex::new(fixtures::three_area_source(), ["A"], FeatureMode::Full).unwrap();

        let s01 = index.sample(1).unwrap();
        assert_eq!((s01.origin, s01.destination), (0, 1));
        assert_eq!(s01.features.to_vec(), vec![10.0, 1.0, 20.0, 2.0, 5.0]);
        assert_eq!(s01.target, 3.0);
        assert_eq!(s01.area, "A");

        let s10 = index.sample(2).unwrap();
        assert_eq!((s10.origin, s10.destination), (1, 0));
        assert_eq!(s10.features.to_vec(), vec![20.0, 2.0, 10.0, 1.0, 5.0]);
        assert_eq!(s10.target, 4.0);
    }

    #[test]
    fn test_row_major_order_across_areas() {
        let index = abc_index();
        let expected: Vec<(&str, usize, usize)> = [("A", 2usize), ("B", 3), ("C", 1)]
            .iter()
            .flat_map(|&(area, n)| {
                (0..n).flat_map(move |i| (0..n).map(move |j| (area, i, j)))
            })
            .collect();

        let actual: Vec<(&str, usize, usize)> = index
            .iter_samples()
            .map(|s| (s.area.as_str(), s.origin, s.destination))
            .collect();

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_locator_round_trip() {
        let index = abc_index();
        for position in 0..index.len() {
            let loc    = index.locator().locate(position).unwrap();
            let sample = index.sample(position).unwrap();
            assert_eq!(index.areas()[loc.area_index], sample.area);
            assert_eq!((loc.origin, loc.destination), (sample.origin, sample.destination));
            assert_eq!(
                index.locator().position(loc.area_index, loc.origin, loc.destination),
                Some(position)
            );
        }
        assert_eq!(index.locator().offset(1), Some(4));
        assert_eq!(index.locator().offset(2), Some(13));
        assert!(index.locator().locate(14).is_none());
    }

    #[test]
    fn test_targets_match_od_matrix() {
        let index = abc_index();
        // area "B" uses od[i, j] = 100 * i + j
        for s in index.iter_samples().filter(|s| s.area == "B") {
            assert_eq!(s.target, (100 * s.origin + s.destination) as f32);
        }
    }

    #[test]
    fn test_single_location_area_yields_self_pair() {
        let index = FlattenedPairSampleIndex::new(fixtures::three_area_source(), ["C"], FeatureMode::Full).unwrap();
        assert_eq!(index.len(), 1);

        let s = index.sample(0).unwrap();
        assert!(s.is_self_pair());
        // demos [0, 1], pois [0.5], distance |0 - 0|
        assert_eq!(s.features.to_vec(), vec![0.0, 1.0, 0.5, 0.0, 1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_self_pairs_retained() {
        let index = abc_index();
        assert_eq!(index.iter_samples().filter(|s| s.is_self_pair()).count(), 2 + 3 + 1);
    }

    #[test]
    fn test_reduced_mode_width() {
        let index = FlattenedPairSampleIndex::new(fixtures::three_area_source(), ["B"], FeatureMode::Reduced).unwrap();
        assert!(index.iter_samples().all(|s| s.features.len() == 3));
    }

    #[test]
    fn test_out_of_range() {
        let index = abc_index();
        assert!(matches!(
            index.sample(14),
            Err(DatasetError::IndexOutOfRange { position: 14, len: 14 })
        ));
        assert!(index.get(14).is_none());
    }

    #[test]
    fn test_missing_area_fails_construction() {
        let result = FlattenedPairSampleIndex::new(fixtures::three_area_source(), ["A", "ghost"], FeatureMode::Full);
        assert!(matches!(result, Err(DatasetError::StorageNotFound { .. })));
    }

    #[test]
    fn test_shape_mismatch_fails_construction() {
        let bad = AreaArrays::new(
            Array2::zeros((2, 1)),
            Array2::zeros((3, 1)),
            Array2::zeros((2, 2)),
            Array2::zeros((2, 2)),
        );
        let source = InMemoryAreaSource::new().with_area("bad", bad);
        let result = FlattenedPairSampleIndex::new(source, ["bad"], FeatureMode::Full);
        assert!(matches!(result, Err(DatasetError::ShapeMismatch(_))));
    }

    #[test]
    fn test_locator_skips_empty_areas() {
        let locator = PairLocator::new([2, 0, 1]);
        assert_eq!(locator.total(), 5);
        assert_eq!(locator.locate(3), Some(PairLocation { area_index: 0, origin: 1, destination: 1 }));
        assert_eq!(locator.locate(4), Some(PairLocation { area_index: 2, origin: 0, destination: 0 }));
        assert_eq!(locator.position(1, 0, 0), None);
        assert_eq!(locator.location_count(2), Some(1));
    }
}
