// ============================================================
// Layer 3 - Area Domain Type
// ============================================================
// One area is a self-contained partition of the dataset with
// its own N locations. It is described by four arrays:
//
//   demographics  (N, D_d)   per-location survey attributes
//   pois          (N, D_p)   per-location point-of-interest counts
//   distances     (N, N)     pairwise distance matrix
//   od_flow       (N, N)     observed commuting flows (the target)
//
// All four are promoted to f32 when loaded. Nothing mutates
// them after load.
//
// Reference: Rust Book §5 (Structs and Methods)

use ndarray::Array2;

use crate::domain::errors::{DatasetError, DatasetResult};

#[derive(Debug, Clone, PartialEq)]
pub struct AreaArrays {
    pub demographics: Array2<f32>,
    pub pois:         Array2<f32>,
    pub distances:    Array2<f32>,
    pub od_flow:      Array2<f32>,
}

impl AreaArrays {
    pub fn new(
        demographics: Array2<f32>,
        pois:         Array2<f32>,
        distances:    Array2<f32>,
        od_flow:      Array2<f32>,
    ) -> Self {
        Self { demographics, pois, distances, od_flow }
    }

    /// N as reported by the demographics array
    pub fn location_count(&self) -> usize {
        self.demographics.nrows()
    }

    /// Checks that the OD matrix is N×N for this area's N.
    /// The feature arrays are checked by the feature builder.
    pub fn check_target(&self) -> DatasetResult<()> {
        check_square("od", &self.od_flow, self.location_count())
    }
}

/// Fails unless `matrix` has shape (n, n)
pub fn check_square(name: &str, matrix: &Array2<f32>, n: usize) -> DatasetResult<()> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(DatasetError::shape(format!(
            "{name} must be square, got ({rows}, {cols})"
        )));
    }
    if rows != n {
        return Err(DatasetError::shape(format!(
            "{name} is ({rows}, {cols}) but the area has {n} locations"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn two_location_area() -> AreaArrays {
        AreaArrays::new(
            array![[10.0], [20.0]],
            array![[1.0], [2.0]],
            array![[0.0, 5.0], [5.0, 0.0]],
            array![[0.0, 3.0], [4.0, 0.0]],
        )
    }

    #[test]
    fn test_location_count() {
        assert_eq!(two_location_area().location_count(), 2);
    }

    #[test]
    fn test_check_target_ok() {
        assert!(two_location_area().check_target().is_ok());
    }

    #[test]
    fn test_non_square_od_rejected() {
        let mut area = two_location_area();
        area.od_flow = array![[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]];
        assert!(matches!(area.check_target(), Err(DatasetError::ShapeMismatch(_))));
    }

    #[test]
    fn test_od_with_wrong_n_rejected() {
        let mut area = two_location_area();
        area.od_flow = array![[1.0]];
        assert!(matches!(area.check_target(), Err(DatasetError::ShapeMismatch(_))));
    }
}
