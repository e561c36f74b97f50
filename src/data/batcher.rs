// ============================================================
// Layer 4 - Batchers
// ============================================================
// Implements Burn's Batcher trait for both sample kinds, so
// either index can be handed to a DataLoader.
//
// PairBatcher:
//   Input:  Vec of B PairSamples, each with a (2F+1,) vector
//   Output: PairBatch
//             features      [B, 2F+1]
//             targets       [B]
//             origins       [B]   (Int)
//             destinations  [B]   (Int)
//
// AreaBatcher:
//   Input:  Vec of B AreaSamples sharing the same N
//   Output: AreaBatch
//             features  [B, N, N, 2F+1]
//             targets   [B, N, N]
//
// Areas of different sizes cannot be stacked into one tensor;
// use a batch size of 1 with the whole-area index when N varies.
//
// Reference: Burn Book §4 (Batcher)

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::area_dataset::AreaSample;
use crate::data::pair_dataset::PairSample;

// ─── PairBatch ────────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct PairBatch<B: Backend> {
    pub features:     Tensor<B, 2>,
    pub targets:      Tensor<B, 1>,
    pub origins:      Tensor<B, 1, Int>,
    pub destinations: Tensor<B, 1, Int>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PairBatcher;

impl PairBatcher {
    pub fn new() -> Self {
        Self
    }
}

impl<B: Backend> Batcher<B, PairSample, PairBatch<B>> for PairBatcher {
    /// Panics if the samples do not all share the same 2F+1 width.
    fn batch(&self, items: Vec<PairSample>, device: &B::Device) -> PairBatch<B> {
        let batch_size = items.len();
        let width      = items.first().map(|s| s.features.len()).unwrap_or(0);

        assert!(
            items.iter().all(|s| s.features.len() == width),
            "cannot batch pair samples with different feature widths; \
             areas in one index should share D_d and D_p"
        );

        let features_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();

        let targets: Vec<f32> = items.iter().map(|s| s.target).collect();
        let origins: Vec<i32> = items.iter().map(|s| s.origin as i32).collect();
        let dests:   Vec<i32> = items.iter().map(|s| s.destination as i32).collect();

        let features = Tensor::<B, 1>::from_floats(features_flat.as_slice(), device)
            .reshape([batch_size, width]);

        PairBatch {
            features,
            targets:      Tensor::<B, 1>::from_floats(targets.as_slice(), device),
            origins:      Tensor::<B, 1, Int>::from_ints(origins.as_slice(), device),
            destinations: Tensor::<B, 1, Int>::from_ints(dests.as_slice(), device),
        }
    }
}

// ─── AreaBatch ────────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct AreaBatch<B: Backend> {
    pub features: Tensor<B, 4>,
    pub targets:  Tensor<B, 3>,
    pub areas:    Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AreaBatcher;

impl AreaBatcher {
    pub fn new() -> Self {
        Self
    }
}

impl<B: Backend> Batcher<B, AreaSample, AreaBatch<B>> for AreaBatcher {
    /// Panics if the samples do not all share the same (N, N, 2F+1) shape.
    fn batch(&self, items: Vec<AreaSample>, device: &B::Device) -> AreaBatch<B> {
        let batch_size = items.len();
        let (n, _, width) = items.first().map(|s| s.features.dim()).unwrap_or((0, 0, 0));

        assert!(
            items.iter().all(|s| s.features.dim() == (n, n, width)),
            "cannot batch areas with different shapes; use batch size 1 when N varies"
        );

        // iter() walks in logical (row-major) order regardless of memory layout
        let features_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();
        let targets_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.target.iter().copied())
            .collect();

        AreaBatch {
            features: Tensor::<B, 1>::from_floats(features_flat.as_slice(), device)
                .reshape([batch_size, n, n, width]),
            targets:  Tensor::<B, 1>::from_floats(targets_flat.as_slice(), device)
                .reshape([batch_size, n, n]),
            areas:    items.into_iter().map(|s| s.area).collect(),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::area_dataset::WholeAreaSampleIndex;
    use crate::data::memory::fixtures;
    use crate::data::pair_dataset::FlattenedPairSampleIndex;
    use crate::domain::feature_mode::FeatureMode;
    use burn::backend::NdArray;
    use burn::data::dataset::Dataset;

    type TestBackend = NdArray;

    #[test]
    fn test_pair_batch_shapes_and_values() {
        let device = <TestBackend as Backend>::Device::default();
        let index  = FlattenedPairSampleIndex::new(fixtures::three_area_source(), ["A"], FeatureMode::Full).unwrap();
        let items: Vec<PairSample> = (0..index.len()).filter_map(|i| index.get(i)).collect();

        let batch: PairBatch<TestBackend> =
            Batcher::<TestBackend, _, _>::batch(&PairBatcher::new(), items, &device);

        assert_eq!(batch.features.dims(), [4, 5]);
        assert_eq!(batch.targets.dims(), [4]);

        let features: Vec<f32> = batch.features.into_data().iter::<f32>().collect();
        assert_eq!(&features[5..10], &[10.0, 1.0, 20.0, 2.0, 5.0]);

        let targets: Vec<f32> = batch.targets.into_data().iter::<f32>().collect();
        assert_eq!(targets, vec![0.0, 3.0, 4.0, 0.0]);

        let origins: Vec<i64> = batch.origins.into_data().iter::<i64>().collect();
        let dests:   Vec<i64> = batch.destinations.into_data().iter::<i64>().collect();
        assert_eq!(origins, vec![0, 0, 1, 1]);
        assert_eq!(dests,   vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_area_batch_shapes() {
        let device = <TestBackend as Backend>::Device::default();
        let index  = WholeAreaSampleIndex::new(fixtures::three_area_source(), ["A", "A"], FeatureMode::Full);
        let items: Vec<AreaSample> = (0..2).filter_map(|i| index.get(i)).collect();

        let batch: AreaBatch<TestBackend> =
            Batcher::<TestBackend, _, _>::batch(&AreaBatcher::new(), items, &device);

        assert_eq!(batch.features.dims(), [2, 2, 2, 5]);
        assert_eq!(batch.targets.dims(), [2, 2, 2]);
        assert_eq!(batch.areas, vec!["A".to_string(), "A".to_string()]);

        let targets: Vec<f32> = batch.targets.into_data().iter::<f32>().collect();
        assert_eq!(targets, vec![0.0, 3.0, 4.0, 0.0, 0.0, 3.0, 4.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "different feature widths")]
    fn test_pair_batch_rejects_mixed_widths() {
        let device = <TestBackend as Backend>::Device::default();
        // "A" has D_d=1 (width 5), "B" has D_d=2 (width 7)
        let index  = FlattenedPairSampleIndex::new(fixtures::three_area_source(), ["A", "B"], FeatureMode::Full).unwrap();
        let items: Vec<PairSample> = (3..5).filter_map(|i| index.get(i)).collect();
        assert_eq!(items[0].features.len(), 5);
        assert_eq!(items[1].features.len(), 7);

        let _: PairBatch<TestBackend> =
            Batcher::<TestBackend, _, _>::batch(&PairBatcher::new(), items, &device);
    }

    #[test]
    #[should_panic(expected = "different shapes")]
    fn test_area_batch_rejects_mixed_sizes() {
        let device = <TestBackend as Backend>::Device::default();
        let index  = WholeAreaSampleIndex::new(fixtures::three_area_source(), ["A", "B"], FeatureMode::Full);
        let items: Vec<AreaSample> = (0..2).filter_map(|i| index.get(i)).collect();

        let _: AreaBatch<TestBackend> =
            Batcher::<TestBackend, _, _>::batch(&AreaBatcher::new(), items, &device);
    }
}
