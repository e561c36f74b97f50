// ============================================================
// Layer 4 - Pairwise Feature Builder
// ============================================================
// Turns N per-location feature vectors plus an N×N distance
// matrix into a dense (N, N, 2F+1) tensor, one feature vector
// per ordered (origin, destination) pair.
//
// Step 1: per-location features, shape (N, F)
//   Full    → concat(demographics, pois) along columns
//   Reduced → demographics[:, 0..1]
//
// Step 2: broadcast expansion
//
//   feat (N, F) ──insert axis 1──▶ (N, 1, F) ──broadcast──▶ origin      (N, N, F)
//   feat (N, F) ──insert axis 0──▶ (1, N, F) ──broadcast──▶ destination (N, N, F)
//   dist (N, N) ──insert axis 2──▶ (N, N, 1)
//
// Step 3: concatenate along the last axis
//
//   x[i, j] = [ feat(i) | feat(j) | dist(i, j) ]
//              0..F      F..2F     2F
//
// Origin always comes before destination; consumers depend on it.
// The broadcasts are views; the concatenated tensor is the only
// O(N²·F) allocation. No scaling or normalisation happens here.
//
// Reference: ndarray crate documentation (broadcasting, concatenate)

use ndarray::{concatenate, s, Array2, Array3, Axis};

use crate::domain::area::{check_square, AreaArrays};
use crate::domain::errors::{DatasetError, DatasetResult};
use crate::domain::feature_mode::FeatureMode;

/// Stateless builder for pairwise feature tensors.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairwiseFeatureBuilder;

impl PairwiseFeatureBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Builds the (N, N, 2F+1) tensor for the given arrays.
    ///
    /// Fails with `ShapeMismatch` if demographics, pois and distances
    /// disagree on N, or if distances is not square.
    pub fn build(
        &self,
        demographics: &Array2<f32>,
        pois:         &Array2<f32>,
        distances:    &Array2<f32>,
        mode:         FeatureMode,
    ) -> DatasetResult<Array3<f32>> {
        let feat   = self.location_features(demographics, pois, mode)?;
        let (n, f) = feat.dim();
        check_square("dis", distances, n)?;

        let origin_column   = feat.view().insert_axis(Axis(1));
        let destination_row = feat.view().insert_axis(Axis(0));

        let origin = origin_column
            .broadcast((n, n, f))
            .ok_or_else(|| DatasetError::shape("cannot broadcast origin features"))?;
        let destination = destination_row
            .broadcast((n, n, f))
            .ok_or_else(|| DatasetError::shape("cannot broadcast destination features"))?;

        let distance = distances.view().insert_axis(Axis(2));

        let x = concatenate(Axis(2), &[origin, destination, distance])
            .map_err(|e| DatasetError::shape(e.to_string()))?;

        tracing::trace!("Built pairwise tensor {:?} ({} mode)", x.dim(), mode);
        Ok(x)
    }

    /// Same as `build`, taking the arrays of a loaded area
    pub fn build_area(&self, area: &AreaArrays, mode: FeatureMode) -> DatasetResult<Array3<f32>> {
        self.build(&area.demographics, &area.pois, &area.distances, mode)
    }

    /// Per-location feature matrix of shape (N, F)
    pub fn location_features(
        &self,
        demographics: &Array2<f32>,
        pois:         &Array2<f32>,
        mode:         FeatureMode,
    ) -> DatasetResult<Array2<f32>> {
        match mode {
            FeatureMode::Full => {
                if demographics.nrows() != pois.nrows() {
                    return Err(DatasetError::shape(format!(
                        "demos has {} locations but pois has {}",
                        demographics.nrows(),
                        pois.nrows(),
                    )));
                }
                concatenate(Axis(1), &[demographics.view(), pois.view()])
                    .map_err(|e| DatasetError::shape(e.to_string()))
            }
            FeatureMode::Reduced => {
                if demographics.ncols() == 0 {
                    return Err(DatasetError::shape(
                        "reduced mode needs at least one demographics column",
                    ));
                }
                // pois are unused here but still have to describe the same locations
                if demographics.nrows() != pois.nrows() {
                    return Err(DatasetError::shape(format!(
                        "demos has {} locations but pois has {}",
                        demographics.nrows(),
                        pois.nrows(),
                    )));
                }
                Ok(demographics.slice(s![.., 0..1]).to_owned())
            }
        }
    }
}
