// ============================================================
// Layer 4 - Area Loader
// ============================================================
// Reads the four arrays of one area from disk.
//
// Storage layout:
//   <root>/
//     <area>/
//       demos.npy   (N, D_d)  demographics
//       pois.npy    (N, D_p)  points of interest
//       dis.npy     (N, N)    distances
//       od.npy      (N, N)    OD flows
//
// The .npy header describes dtype and shape. Demographics and
// POIs are often stored as integers, so every array is read
// with whichever element type matches the header and then
// promoted to f32.
//
// Nothing is cached here: every load() goes back to disk.
// Wrap the loader in an AreaCache to trade memory for I/O.
//
// Leading-dimension agreement between the arrays is checked
// later by the feature builder; the loader only enforces that
// each array exists and is two-dimensional.
//
// Reference: ndarray-npy crate documentation
//            Rust Book §9 (Error Handling)

use ndarray::Array2;
use ndarray_npy::{ReadNpyError, ReadNpyExt};
use std::path::{Path, PathBuf};

use crate::domain::area::AreaArrays;
use crate::domain::errors::{DatasetError, DatasetResult};
use crate::domain::traits::AreaSource;

/// File stems of the four arrays every area directory must hold
pub const DEMOGRAPHICS_FILE: &str = "demos";
pub const POIS_FILE:         &str = "pois";
pub const DISTANCES_FILE:    &str = "dis";
pub const OD_FILE:           &str = "od";

/// Loads areas from a root directory of per-area subdirectories.
#[derive(Debug, Clone)]
pub struct NpyAreaLoader {
    root: PathBuf,
}

impl NpyAreaLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the arrays of `area`
    pub fn area_dir(&self, area: &str) -> PathBuf {
        self.root.join(area)
    }

    /// Lists area identifiers under the root: every subdirectory
    /// that holds all four arrays, sorted by name.
    pub fn discover_areas(&self) -> DatasetResult<Vec<String>> {
        let entries = std::fs::read_dir(&self.root).map_err(|_| DatasetError::StorageNotFound {
            path: self.root.clone(),
        })?;

        let mut areas = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DatasetError::storage(&self.root, e.to_string()))?;
            let path  = entry.path();
            if !path.is_dir() {
                continue;
            }
            let complete = [DEMOGRAPHICS_FILE, POIS_FILE, DISTANCES_FILE, OD_FILE]
                .iter()
                .all(|stem| npy_path(&path, stem).is_file());
            match (complete, path.file_name().and_then(|n| n.to_str())) {
                (true, Some(name)) => areas.push(name.to_string()),
                (false, Some(name)) => {
                    tracing::debug!("Skipping '{}': not all four arrays present", name);
                }
                (_, None) => {
                    tracing::debug!("Skipping '{}': directory name is not valid UTF-8", path.display());
                }
            }
        }

        areas.sort();
        tracing::info!("Discovered {} areas under '{}'", areas.len(), self.root.display());
        Ok(areas)
    }
}

impl AreaSource for NpyAreaLoader {
    fn load(&self, area: &str) -> DatasetResult<AreaArrays> {
        let dir = self.area_dir(area);
        if !dir.is_dir() {
            return Err(DatasetError::StorageNotFound { path: dir });
        }

        let demographics = read_matrix(&npy_path(&dir, DEMOGRAPHICS_FILE))?;
        let pois         = read_matrix(&npy_path(&dir, POIS_FILE))?;
        let distances    = read_matrix(&npy_path(&dir, DISTANCES_FILE))?;
        let od_flow      = read_matrix(&npy_path(&dir, OD_FILE))?;

        tracing::debug!(
            "Loaded area '{}': demos {:?}, pois {:?}, dis {:?}, od {:?}",
            area,
            demographics.dim(),
            pois.dim(),
            distances.dim(),
            od_flow.dim(),
        );

        Ok(AreaArrays::new(demographics, pois, distances, od_flow))
    }
}

fn npy_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{stem}.npy"))
}

// ─── dtype promotion ──────────────────────────────────────────────────────────
// ndarray-npy checks the header's type descriptor against the
// requested element type and reports WrongDescriptor on a
// mismatch, so each candidate type is tried in turn.
macro_rules! read_promoted {
    ($path:expr, $bytes:expr, $($ty:ty),+ $(,)?) => {{
        $(
            match Array2::<$ty>::read_npy($bytes) {
                Ok(arr) => return Ok(arr.mapv(|v| v as f32)),
                Err(ReadNpyError::WrongDescriptor(_)) => {}
                Err(e) => return Err(npy_error($path, e)),
            }
        )+
    }};
}

/// Reads a two-dimensional numeric .npy file as f32
fn read_matrix(path: &Path) -> DatasetResult<Array2<f32>> {
    if !path.is_file() {
        return Err(DatasetError::StorageNotFound { path: path.to_path_buf() });
    }

    // Read once; each dtype attempt only re-parses the in-memory header
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DatasetError::StorageNotFound { path: path.to_path_buf() },
        _ => DatasetError::storage(path, e.to_string()),
    })?;

    read_promoted!(path, &bytes[..], f64, f32, i64, i32, i16, i8, u64, u32, u16, u8);

    Err(DatasetError::storage(path, "unsupported element type"))
}

fn npy_error(path: &Path, err: ReadNpyError) -> DatasetError {
    match err {
        ReadNpyError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
            DatasetError::StorageNotFound { path: path.to_path_buf() }
        }
        ReadNpyError::WrongNdim(expected, actual) => DatasetError::shape(format!(
            "'{}' has {} dimensions, expected {:?}",
            path.display(),
            actual,
            expected,
        )),
        other => DatasetError::storage(path, other.to_string()),
    }
}
