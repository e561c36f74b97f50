// ============================================================
// Layer 3 - Dataset Errors
// ============================================================
// Every failure in the dataset layer is fatal for the call
// that produced it. There is no retry logic: a missing file
// or an inconsistent shape means the input data is unusable.
//
//   StorageNotFound  - area directory or one of its arrays is missing
//   Storage          - file exists but cannot be decoded as .npy
//   ShapeMismatch    - location counts disagree / matrix not square
//   IndexOutOfRange  - sample position outside 0..len
//
// Reference: Rust Book §9 (Error Handling)
//            thiserror crate documentation

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    /// The area directory or one of demos/pois/dis/od is missing
    #[error("storage not found: '{}'", path.display())]
    StorageNotFound { path: PathBuf },

    /// The file exists but its contents could not be read as an array
    #[error("cannot read '{}': {message}", path.display())]
    Storage { path: PathBuf, message: String },

    /// Arrays of one area disagree on N, or a pairwise matrix is not square
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Sample position outside the valid range
    #[error("index {position} out of range for dataset of length {len}")]
    IndexOutOfRange { position: usize, len: usize },
}

impl DatasetError {
    pub fn shape(message: impl Into<String>) -> Self {
        DatasetError::ShapeMismatch(message.into())
    }

    pub fn storage(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DatasetError::Storage {
            path:    path.into(),
            message: message.into(),
        }
    }
}

pub type DatasetResult<T> = Result<T, DatasetError>;
